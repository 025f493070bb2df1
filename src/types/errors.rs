use std::fmt;

// === StorageError ===

/// Errors raised by key/value storage backends.
#[derive(Debug)]
pub enum StorageError {
    /// Database operation failed.
    DatabaseError(String),
    /// The backend is unavailable (poisoned lock, closed handle).
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

// === StoreError ===

/// Errors related to the recent products store.
#[derive(Debug)]
pub enum StoreError {
    /// The product id is empty.
    InvalidId(String),
    /// Failed to serialize the product list.
    SerializationError(String),
    /// Writing the persisted blob failed.
    PersistFailed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidId(msg) => write!(f, "Invalid product id: {}", msg),
            StoreError::SerializationError(msg) => {
                write!(f, "Recent products serialization error: {}", msg)
            }
            StoreError::PersistFailed(msg) => {
                write!(f, "Failed to persist recent products: {}", msg)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        StoreError::PersistFailed(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === LocaleError ===

/// Errors related to localization.
#[derive(Debug)]
pub enum LocaleError {
    /// The requested locale is not supported.
    UnsupportedLocale(String),
    /// A bundled message table failed to parse.
    InvalidTable(String),
}

impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleError::UnsupportedLocale(locale) => {
                write!(f, "Unsupported locale: {}", locale)
            }
            LocaleError::InvalidTable(msg) => write!(f, "Invalid locale table: {}", msg),
        }
    }
}

impl std::error::Error for LocaleError {}
