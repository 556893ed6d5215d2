/// Common metadata keys shared by every player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    Title,
    Artist,
    AlbumName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataItem {
    pub key: MetadataKey,
    pub value: String,
}

impl MetadataItem {
    pub fn new(key: MetadataKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// First value stored under `key`.
pub fn lookup(items: &[MetadataItem], key: MetadataKey) -> Option<&str> {
    items
        .iter()
        .find(|item| item.key == key)
        .map(|item| item.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let items = vec![
            MetadataItem::new(MetadataKey::Title, "Song A"),
            MetadataItem::new(MetadataKey::Artist, "Artist A"),
        ];
        assert_eq!(lookup(&items, MetadataKey::Artist), Some("Artist A"));
        assert_eq!(lookup(&items, MetadataKey::AlbumName), None);
    }
}
