//! Shared regex patterns for shipping-document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Loose phone shape: optional area-code parentheses, 4-5 digit
    /// exchange, 4 digit line, optional separators.
    pub static ref PHONE: Regex = Regex::new(
        r"\(?\d{2}\)?\s?\d{4,5}[-\s]?\d{4}"
    ).unwrap();

    /// Vehicle plates: legacy (AAA-9999) or Mercosul (AAA9A99) format.
    pub static ref PLATE: Regex = Regex::new(
        r"(?i)\b([A-Z]{3}-?\d{4}|[A-Z]{3}\d[A-Z0-9]\d{2})\b"
    ).unwrap();

    /// DD/MM/YYYY date token.
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{2})/(\d{2})/(\d{4})\b"
    ).unwrap();

    /// Labeled delivery deadline: "data limite de entrega 15/03/2024".
    pub static ref DELIVERY_DEADLINE: Regex = Regex::new(
        r"(?i)data\s+limite\s+(?:de\s+)?entrega[\s:]*(\d{2})/(\d{2})/(\d{4})"
    ).unwrap();

    /// Row tokens that are never a vehicle model.
    pub static ref MODEL_EXCLUDE: Regex = Regex::new(
        r"FIPE|CHASSI|COR|ANO"
    ).unwrap();

    /// Row tokens that are never a city value.
    pub static ref CITY_EXCLUDE: Regex = Regex::new(
        r"BAIRRO|ESTADO|CEP"
    ).unwrap();
}
