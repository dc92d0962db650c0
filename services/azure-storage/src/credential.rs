// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use storsign_core::hash::{base64_decode, base64_encode};
use storsign_core::utils::Redact;
use storsign_core::{Error, Result, SigningCredential};

/// Credential that holds the storage account name and its raw key.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Storage account name.
    pub account_name: String,
    /// Storage account key, already decoded from its Base64 form.
    pub account_key: Vec<u8>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let key = base64_encode(&self.account_key);
        f.debug_struct("Credential")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.account_key.is_empty()
    }
}

impl Credential {
    /// Create a new credential from an account name and raw key bytes.
    pub fn with_shared_key(account_name: impl Into<String>, account_key: impl Into<Vec<u8>>) -> Self {
        Self {
            account_name: account_name.into(),
            account_key: account_key.into(),
        }
    }

    /// Create a new credential from the Base64 account key the service hands out.
    pub fn from_base64_key(account_name: impl Into<String>, account_key: &str) -> Result<Self> {
        let account_name = account_name.into();
        let account_key = base64_decode(account_key).map_err(|e| {
            Error::credential_invalid("account key is not valid base64")
                .with_source(e)
                .with_context(format!("account_name: {account_name}"))
        })?;

        Ok(Self {
            account_name,
            account_key,
        })
    }
}
