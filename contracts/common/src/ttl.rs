use soroban_sdk::{Env, IntoVal, TryFromVal, Val};

/// Ledgers below which a persistent entry's TTL gets bumped.
pub const TTL_THRESHOLD: u32 = 5184000;
/// Ledgers a bumped persistent entry lives for.
pub const TTL_EXTEND_TO: u32 = 10368000;

/// Extends the time-to-live (TTL) of a persistent storage entry.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Reads a persistent entry and bumps its TTL when it exists.
pub fn read_persistent<K, V>(env: &Env, key: &K) -> Option<V>
where
    K: IntoVal<Env, Val>,
    V: TryFromVal<Env, Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        extend_persistent(env, key);
    }
    value
}

/// Extends the time-to-live (TTL) for instance storage.
/// Instance storage TTL applies to all keys in the instance storage.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
