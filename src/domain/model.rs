use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub url: String,
    /// `IMAGE` or `VIDEO` as tagged by the portal API.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Ad {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: None,
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|k| k.eq_ignore_ascii_case("video"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub price: f64,
}

impl Package {
    /// Price label shown in the second table cell.
    pub fn price_label(&self) -> String {
        format!("UGX {}", Price(self.price))
    }
}

/// Stringifies a JSON number the way a browser does: shortest digits, no
/// trailing `.0`, exponent form outside `[1e-6, 1e21)`.
struct Price(f64);

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.0;
        if value == 0.0 {
            return f.write_str("0");
        }
        if (1e-6..1e21).contains(&value.abs()) {
            return write!(f, "{}", value);
        }

        let exp = format!("{:e}", value);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, power)
            }
            _ => f.write_str(&exp),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdsResponse {
    #[serde(default)]
    pub ads: Option<Vec<Ad>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackagesResponse {
    #[serde(default)]
    pub packages: Option<Vec<Package>>,
}

/// Anything the loaders can turn into a list of items. `None` and an empty
/// list are treated the same.
pub trait ListPayload {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

impl ListPayload for AdsResponse {
    type Item = Ad;

    fn into_items(self) -> Vec<Ad> {
        self.ads.unwrap_or_default()
    }
}

impl ListPayload for PackagesResponse {
    type Item = Package;

    fn into_items(self) -> Vec<Package> {
        self.packages.unwrap_or_default()
    }
}
