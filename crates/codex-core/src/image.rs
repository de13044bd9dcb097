//! Image URL sets derived from icon ids

use crate::config::ImageConfig;
use serde::Serialize;

/// Resolution tiers, lowest first
pub const TIERS: [&str; 4] = ["icon", "sd", "hq", "hd"];

/// What an image id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Item,
    Mount,
}

impl ImageKind {
    fn segment(&self) -> &'static str {
        match self {
            ImageKind::Item => "item",
            ImageKind::Mount => "mount",
        }
    }
}

/// Public image URLs; higher tiers the asset lacks are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSet {
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hd: Option<String>,
}

impl ImageSet {
    /// Build from a list of URLs ordered icon, sd, hq, hd.
    ///
    /// Returns `None` for an empty list; URLs past the fourth are ignored.
    pub fn from_urls(urls: Vec<String>) -> Option<Self> {
        let mut urls = urls.into_iter();
        let icon = urls.next()?;
        Some(Self {
            icon,
            sd: urls.next(),
            hq: urls.next(),
            hd: urls.next(),
        })
    }
}

/// Compose the URLs for one image id, one per configured tier.
pub fn image_urls(config: &ImageConfig, kind: ImageKind, id: u32) -> Vec<String> {
    let base = config.base_url.trim_end_matches('/');
    let tiers = match kind {
        ImageKind::Item => config.item_tiers,
        ImageKind::Mount => config.mount_tiers,
    };
    TIERS
        .iter()
        .take(usize::from(tiers))
        .map(|tier| match *tier {
            "icon" => format!("{}/{}/{}.png", base, kind.segment(), id),
            tier => format!("{}/{}/{}/{}.png", base, kind.segment(), tier, id),
        })
        .collect()
}

/// Compose the full image set for one image id
pub fn image_set(config: &ImageConfig, kind: ImageKind, id: u32) -> Option<ImageSet> {
    ImageSet::from_urls(image_urls(config, kind, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(item_tiers: u8, mount_tiers: u8) -> ImageConfig {
        ImageConfig {
            base_url: "https://img.example.org/".to_string(),
            item_tiers,
            mount_tiers,
        }
    }

    #[test]
    fn test_icon_only() {
        let set = image_set(&config(1, 4), ImageKind::Item, 7).unwrap();
        assert_eq!(set.icon, "https://img.example.org/item/7.png");
        assert!(set.sd.is_none() && set.hq.is_none() && set.hd.is_none());

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({"icon": "https://img.example.org/item/7.png"}));
    }

    #[test]
    fn test_all_tiers() {
        let set = image_set(&config(1, 4), ImageKind::Mount, 3).unwrap();
        assert_eq!(set.sd.as_deref(), Some("https://img.example.org/mount/sd/3.png"));
        assert_eq!(set.hq.as_deref(), Some("https://img.example.org/mount/hq/3.png"));
        assert_eq!(set.hd.as_deref(), Some("https://img.example.org/mount/hd/3.png"));
    }

    #[test]
    fn test_from_urls() {
        assert!(ImageSet::from_urls(vec![]).is_none());
        let set = ImageSet::from_urls(vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(set.sd.as_deref(), Some("b"));
        assert!(set.hq.is_none());
    }
}
