use crate::core::{ConfigProvider, Result, Storage};
use crate::utils::error::PortalError;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

const TEXT_EXTENSIONS: &[&str] = &["html", "js", "css"];

/// Values written into a captive-portal template.
#[derive(Debug, Clone)]
pub struct BundleValues {
    pub api_base: String,
    pub location_id: String,
    pub support_phone: String,
}

impl BundleValues {
    pub fn from_config(config: &impl ConfigProvider, support_phone: Option<&str>) -> Self {
        Self {
            api_base: config.api_base().to_string(),
            location_id: config.location_id().to_string(),
            support_phone: support_phone.unwrap_or_default().to_string(),
        }
    }

    fn apply(&self, text: &str) -> String {
        text.replace("{{API_BASE}}", &self.api_base)
            .replace("{{LOCATION_UUID}}", &self.location_id)
            .replace("{{SUPPORT_PHONE}}", &self.support_phone)
    }
}

/// Rewrites a template ZIP so the portal pages know which API and location
/// to load from. Only `.html`, `.js` and `.css` entries are touched.
pub fn inject_template(template: &[u8], values: &BundleValues) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(template))?;
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();

        if entry.is_dir() {
            zip.add_directory(name.as_str(), options)?;
            continue;
        }

        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;

        zip.start_file(name.as_str(), options)?;
        if is_text_entry(&name) {
            let text = String::from_utf8(content)
                .map_err(|_| PortalError::TemplateEncoding { entry: name.clone() })?;
            zip.write_all(values.apply(&text).as_bytes())?;
        } else {
            zip.write_all(&content)?;
        }
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn is_text_entry(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TEXT_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// `hotspot-{label}.zip`, with anything outside `[A-Za-z0-9_-]` turned into `-`.
pub fn bundle_file_name(label: &str) -> String {
    let safe: String = label
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("hotspot-{}.zip", safe)
}

pub struct PortalBundler<S: Storage> {
    storage: S,
}

impl<S: Storage> PortalBundler<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Reads `template_path` from storage, injects `values` and writes the
    /// result next to it as `hotspot-{label}.zip`. Returns the written name.
    pub async fn bundle(
        &self,
        template_path: &str,
        values: &BundleValues,
        label: &str,
    ) -> Result<String> {
        tracing::info!("Building portal bundle from template {}", template_path);
        let template = self.storage.read_file(template_path).await?;
        tracing::debug!("Template is {} bytes", template.len());

        let bundle = inject_template(&template, values)?;
        let file_name = bundle_file_name(label);

        self.storage.write_file(&file_name, &bundle).await?;
        tracing::info!("Portal bundle written: {} ({} bytes)", file_name, bundle.len());
        Ok(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                PortalError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn values() -> BundleValues {
        BundleValues {
            api_base: "https://billing.example.com/api/portal/".to_string(),
            location_id: "5b0c".to_string(),
            support_phone: "+256700000000".to_string(),
        }
    }

    fn template(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn read_entry(bundle: &[u8], name: &str) -> Vec<u8> {
        let mut archive = ZipArchive::new(Cursor::new(bundle)).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut out = Vec::new();
        entry.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_placeholders_replaced_in_text_entries() {
        let tpl = template(&[
            (
                "login.html",
                b"<script>window.API_BASE='{{API_BASE}}';window.LOCATION_UUID='{{LOCATION_UUID}}';</script>",
            ),
            ("css/style.CSS", b"/* {{SUPPORT_PHONE}} */"),
        ]);

        let bundle = inject_template(&tpl, &values()).unwrap();

        assert_eq!(
            String::from_utf8(read_entry(&bundle, "login.html")).unwrap(),
            "<script>window.API_BASE='https://billing.example.com/api/portal/';window.LOCATION_UUID='5b0c';</script>"
        );
        assert_eq!(
            read_entry(&bundle, "css/style.CSS"),
            b"/* +256700000000 */".to_vec()
        );
    }

    #[test]
    fn test_binary_entries_copied_verbatim() {
        let logo: &[u8] = &[0x89, b'P', b'N', b'G', 0xff, 0x00, b'{', b'{'];
        let tpl = template(&[("img/logo.png", logo), ("notes.txt", b"{{API_BASE}}")]);

        let bundle = inject_template(&tpl, &values()).unwrap();

        assert_eq!(read_entry(&bundle, "img/logo.png"), logo.to_vec());
        assert_eq!(read_entry(&bundle, "notes.txt"), b"{{API_BASE}}".to_vec());
    }

    #[test]
    fn test_invalid_utf8_text_entry_is_rejected() {
        let tpl = template(&[("portal.js", &[0xff, 0xfe, 0xfd])]);
        let err = inject_template(&tpl, &values()).unwrap_err();
        assert!(matches!(err, PortalError::TemplateEncoding { entry } if entry == "portal.js"));
    }

    #[test]
    fn test_not_a_zip() {
        let err = inject_template(b"plain text", &values()).unwrap_err();
        assert!(matches!(err, PortalError::Bundle(_)));
    }

    #[test]
    fn test_bundle_file_name() {
        assert_eq!(bundle_file_name("Kampala Central"), "hotspot-Kampala-Central.zip");
        assert_eq!(bundle_file_name("5b0c-11"), "hotspot-5b0c-11.zip");
    }

    #[tokio::test]
    async fn test_bundler_reads_and_writes_through_storage() {
        let storage = MockStorage::default();
        storage
            .write_file("template.zip", &template(&[("login.html", b"{{LOCATION_UUID}}")]))
            .await
            .unwrap();

        let bundler = PortalBundler::new(storage.clone());
        let name = bundler.bundle("template.zip", &values(), "lobby").await.unwrap();

        assert_eq!(name, "hotspot-lobby.zip");
        let written = storage.read_file(&name).await.unwrap();
        assert_eq!(read_entry(&written, "login.html"), b"5b0c".to_vec());
    }
}
