//! Store profile: the shop identity printed on every page.

use serde::{Deserialize, Serialize};

use super::layout::PaperSize;

/// Store identity and paper selection handed to the composers.
///
/// ## Example
///
/// ```
/// use struk::printer::{PaperSize, StoreProfile};
///
/// let profile = StoreProfile {
///     store_name: "WARUNG KOPI".into(),
///     store_address: "Jl. Merdeka 1".into(),
///     store_phone: None,
///     store_footer: "Terima kasih".into(),
///     paper_size: PaperSize::Mm58,
/// };
/// assert_eq!(profile.width(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub store_name: String,
    pub store_address: String,
    #[serde(default)]
    pub store_phone: Option<String>,
    #[serde(default)]
    pub store_footer: String,
    #[serde(default)]
    pub paper_size: PaperSize,
}

impl StoreProfile {
    /// Characters per line for this profile's paper.
    #[inline]
    pub fn width(&self) -> usize {
        self.paper_size.width()
    }

    /// Phone number, if one is set and non-empty.
    pub fn phone(&self) -> Option<&str> {
        self.store_phone.as_deref().filter(|p| !p.is_empty())
    }
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            store_name: "TOKO ANDA".to_string(),
            store_address: "Jalan Kenangan No. 123".to_string(),
            store_phone: Some("08123456789".to_string()),
            store_footer: "Terima kasih atas kunjungan Anda!".to_string(),
            paper_size: PaperSize::Mm80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_size_defaults_when_missing() {
        let profile: StoreProfile = serde_json::from_str(
            r#"{"store_name": "A", "store_address": "B", "store_footer": "C"}"#,
        )
        .unwrap();
        assert_eq!(profile.paper_size, PaperSize::Mm80);
        assert_eq!(profile.width(), 48);
        assert_eq!(profile.phone(), None);
    }

    #[test]
    fn test_empty_phone_is_absent() {
        let profile = StoreProfile {
            store_phone: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(profile.phone(), None);
    }
}
