mod shared_key;
