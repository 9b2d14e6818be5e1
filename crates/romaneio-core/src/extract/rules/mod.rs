//! Pattern-based field resolvers over concatenated document text.

pub mod cities;
pub mod dates;
pub mod patterns;
pub mod phones;
pub mod plates;

pub use cities::DestinationResolver;
pub use dates::extract_delivery_date;
pub use phones::{digits_only, extract_phones, normalize_phone};
pub use plates::{extract_plates, normalize_plate};
