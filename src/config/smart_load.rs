use figment::providers::{Data, Format, Json, Toml};
use std::path::Path;

/// Pick a file provider from the path's extension.
///
/// `.json` files are read as JSON; everything else is read as TOML unless
/// its content looks like a JSON object.
pub fn auto<P: AsRef<Path>>(path: P) -> impl figment::Provider {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => SmartProvider::Json(Json::file(path)),
        "toml" => SmartProvider::Toml(Toml::file(path)),
        _ => match std::fs::read_to_string(path) {
            Ok(content) if looks_like_json(&content) => {
                tracing::debug!("Reading {} as JSON", path.display());
                SmartProvider::Json(Json::file(path))
            }
            _ => SmartProvider::Toml(Toml::file(path)),
        },
    }
}

/// Wrapper enum to handle different provider types
enum SmartProvider {
    Toml(Data<Toml>),
    Json(Data<Json>),
}

impl figment::Provider for SmartProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
        }
    }

    fn data(
        &self,
    ) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
        }
    }
}

fn looks_like_json(content: &str) -> bool {
    let trimmed = content.trim();
    trimmed.starts_with('{') && trimmed.ends_with('}')
}
