//! # Entry Names
//!
//! Which names an archive accepts and how they are written.
//!
//! | Extension  | Accepted when                       |
//! |------------|-------------------------------------|
//! | `.json`    | the name is exactly `pass.json`     |
//! | `.png`     | always                              |
//! | `.strings` | always                              |
//! | other      | never; the entry is skipped         |
//!
//! Extensions are matched case-sensitively on the last path segment.

/// Name of the descriptor entry.
pub const DESCRIPTOR_NAME: &str = "pass.json";

/// Name of the manifest entry written on close.
pub const MANIFEST_NAME: &str = "manifest.json";

/// Name of the detached signature entry written on close.
pub const SIGNATURE_NAME: &str = "signature";

/// What an accepted entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Descriptor,
    Image,
    Strings,
}

/// Convert host separators to forward slashes.
pub fn normalize_name(name: &str) -> String {
    name.replace('\\', "/")
}

/// Extension of the last path segment, including the dot.
fn extension(name: &str) -> Option<&str> {
    let file = name.rsplit('/').next().unwrap_or(name);
    file.rfind('.').map(|i| &file[i..])
}

/// Classify a normalized entry name. `None` means the entry is skipped.
pub fn classify(name: &str) -> Option<EntryKind> {
    match extension(name)? {
        ".json" if name == DESCRIPTOR_NAME => Some(EntryKind::Descriptor),
        ".png" => Some(EntryKind::Image),
        ".strings" => Some(EntryKind::Strings),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_only_at_root() {
        assert_eq!(classify("pass.json"), Some(EntryKind::Descriptor));
        assert_eq!(classify("other.json"), None);
        assert_eq!(classify("en.lproj/pass.json"), None);
        assert_eq!(classify("manifest.json"), None);
    }

    #[test]
    fn assets_accepted_anywhere() {
        assert_eq!(classify("icon.png"), Some(EntryKind::Image));
        assert_eq!(classify("icon@2x.png"), Some(EntryKind::Image));
        assert_eq!(
            classify("en.lproj/pass.strings"),
            Some(EntryKind::Strings)
        );
    }

    #[test]
    fn other_extensions_skipped() {
        assert_eq!(classify("notes.txt"), None);
        assert_eq!(classify("signature"), None);
        assert_eq!(classify("ICON.PNG"), None);
        assert_eq!(classify("en.lproj/README"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn backslashes_become_slashes() {
        assert_eq!(normalize_name("en.lproj\\pass.strings"), "en.lproj/pass.strings");
        assert_eq!(normalize_name("icon.png"), "icon.png");
    }
}
