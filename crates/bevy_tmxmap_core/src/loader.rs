//! Loading documents straight from the filesystem.

use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::Path;

use normalize_path::NormalizePath;
use tracing::{debug, warn};

use crate::error::{Result, TmxError};
use crate::map::Map;
use crate::tileset::Tileset;

/// Fail with [`TmxError::UnsupportedFormat`] unless `path` ends in `.{expected}`.
///
/// The comparison ignores ASCII case. Earlier Tiled loaders inverted this test and
/// refused files that did carry the right extension; that was a bug, and a correct
/// extension is never rejected here.
pub fn check_extension(path: &Path, expected: &'static str) -> Result<()> {
    let matches = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(expected));
    if matches {
        Ok(())
    } else {
        Err(TmxError::UnsupportedFormat {
            path: path.to_path_buf(),
            expected,
        })
    }
}

fn read_document(path: &Path, expected: &'static str) -> Result<String> {
    check_extension(path, expected)?;
    std::fs::read_to_string(path).map_err(|source| TmxError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Map {
    /// Read and parse a `.tmx` file.
    ///
    /// Parse errors name `path` as the failing document.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = read_document(path, "tmx")?;
        Self::parse_str(&text).map_err(|error| error.in_document(path.display().to_string()))
    }

    /// Parse every tileset this map references, keyed by `first_gid`.
    ///
    /// Sources are resolved against `base_dir`, usually the directory holding the map.
    /// References whose file does not exist are skipped; any other failure aborts.
    pub fn load_tilesets(&self, base_dir: impl AsRef<Path>) -> Result<BTreeMap<u32, Tileset>> {
        let base_dir = base_dir.as_ref();
        let mut tilesets = BTreeMap::new();

        for reference in &self.tilesets {
            let path = base_dir.join(&reference.source).normalize();
            if !path.exists() {
                warn!(
                    path = %path.display(),
                    first_gid = reference.first_gid,
                    "tileset file not found, skipping"
                );
                continue;
            }
            let tileset = Tileset::from_file(&path)?;
            tilesets.insert(reference.first_gid, tileset);
        }

        debug!(
            loaded = tilesets.len(),
            referenced = self.tilesets.len(),
            "loaded map tilesets"
        );
        Ok(tilesets)
    }
}

impl Tileset {
    /// Read and parse a `.tsx` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = read_document(path, "tsx")?;
        Self::parse_str(&text).map_err(|error| error.in_document(path.display().to_string()))
    }

    /// Parse a tileset from any byte stream holding UTF-8 `.tsx` text.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(TmxError::Read)?;
        Self::parse_str(&text)
    }
}

/// Whether `error` means the input was never there, as opposed to being unreadable.
pub fn is_not_found(error: &TmxError) -> bool {
    matches!(error, TmxError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::error::DocumentError;

    const TILESET: &str = r#"<tileset tiledversion="1.10" name="terrain" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <image source="terrain.png" width="32" height="32"/>
</tileset>"#;

    const MAP: &str = r#"<map tiledversion="1.10" orientation="orthogonal" renderorder="right-down" width="2" height="1" tilewidth="16" tileheight="16">
 <tileset firstgid="1" source="tilesets/terrain.tsx"/>
 <tileset firstgid="5" source="tilesets/../missing.tsx"/>
 <layer id="1" name="ground" width="2" height="1"><data encoding="csv">1,2</data></layer>
</map>"#;

    /// Fresh scratch directory unique to `name`.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bevy_tmxmap_core_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("tilesets")).unwrap();
        dir
    }

    #[test]
    fn test_check_extension() {
        assert!(check_extension(Path::new("level.tmx"), "tmx").is_ok());
        assert!(check_extension(Path::new("maps/LEVEL.TMX"), "tmx").is_ok());
        assert!(check_extension(Path::new("terrain.Tsx"), "tsx").is_ok());

        assert!(matches!(
            check_extension(Path::new("terrain.tsx"), "tmx"),
            Err(TmxError::UnsupportedFormat { expected: "tmx", .. })
        ));
        assert!(check_extension(Path::new("level.json"), "tmx").is_err());
        assert!(check_extension(Path::new("level"), "tmx").is_err());
        assert!(check_extension(Path::new("tmx"), "tmx").is_err());
    }

    #[test]
    fn test_wrong_extension_is_rejected_before_reading() {
        // The file does not exist; the extension check must fire first.
        let error = Map::from_file("does/not/exist.tsx").unwrap_err();
        assert!(matches!(error, TmxError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = Tileset::from_file("does/not/exist.tsx").unwrap_err();
        assert!(is_not_found(&error));
        assert!(matches!(error, TmxError::Io { ref path, .. } if path.ends_with("exist.tsx")));
    }

    #[test]
    fn test_from_file_and_load_tilesets() {
        let dir = scratch_dir("load");
        fs::write(dir.join("tilesets/terrain.tsx"), TILESET).unwrap();
        fs::write(dir.join("level.tmx"), MAP).unwrap();

        let map = Map::from_file(dir.join("level.tmx")).unwrap();
        assert_eq!(map.tilesets.len(), 2);

        let tilesets = map.load_tilesets(&dir).unwrap();
        assert_eq!(tilesets.len(), 1);
        let terrain = &tilesets[&1];
        assert_eq!(terrain.name.as_deref(), Some("terrain"));
        assert_eq!(terrain.source_cell(3), Some((1, 1)));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_tilesets_propagates_parse_errors() {
        let dir = scratch_dir("broken");
        fs::write(dir.join("tilesets/terrain.tsx"), "<tileset").unwrap();
        let map = Map::parse_str(MAP).unwrap();

        let error = map.load_tilesets(&dir).unwrap_err();
        match error {
            TmxError::Malformed { document, source } => {
                assert!(document.ends_with("terrain.tsx"));
                assert!(matches!(source, DocumentError::Xml(_)));
            }
            other => panic!("unexpected error: {other}"),
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_from_reader() {
        let tileset = Tileset::from_reader(TILESET.as_bytes()).unwrap();
        assert_eq!(tileset.tile_count, 4);

        let error = Tileset::from_reader(&[0xff, 0xfe][..]).unwrap_err();
        assert!(matches!(error, TmxError::Read(_)));
    }
}
