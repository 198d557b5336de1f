use crate::store::Value;

/// Outcome of resolving one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the lookup cache; the store was not contacted.
    Cached(Value),
    /// Fetched from the store and written back to the cache.
    Fetched(Value),
    /// Neither the cache nor the store holds the key.
    NotFound,
}

impl Resolution {
    pub fn status(&self) -> LookupStatus {
        match self {
            Resolution::Cached(_) => LookupStatus::HitCache,
            Resolution::Fetched(_) => LookupStatus::HitStore,
            Resolution::NotFound => LookupStatus::Miss,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        !matches!(self, Resolution::NotFound)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Resolution::Cached(value) | Resolution::Fetched(value) => Some(value),
            Resolution::NotFound => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Resolution::Cached(value) | Resolution::Fetched(value) => Some(value),
            Resolution::NotFound => None,
        }
    }
}

/// Where a resolution was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupStatus {
    HitCache,
    HitStore,
    Miss,
}

impl LookupStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStatus::HitCache => "HIT_CACHE",
            LookupStatus::HitStore => "HIT_STORE",
            LookupStatus::Miss => "MISS",
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        !matches!(self, LookupStatus::Miss)
    }
}

impl std::fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
