pub mod crypto;
pub mod listing;
pub mod record;
pub mod store;
pub mod text;

pub use crypto::{derive_key, Cipher};
pub use listing::ListingError;
pub use record::Record;
pub use store::{RecordStore, StoreState};
pub use text::{encode_text, mask_password, Plaintext};

pub type Result<T> = std::result::Result<T, crate::error::CoreError>;
