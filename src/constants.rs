/// Defaults and bounds applied by the option validator
pub const DEFAULT_VERSION: u32 = 1;
pub const DEFAULT_LIMIT: u64 = 100;
pub const MIN_LIMIT: u64 = 1;
pub const MAX_LIMIT: u64 = 1000;

// Content types accepted in the `type` option
pub const TYPE_LIST: &str = "list";
pub const TYPE_OBJECT: &str = "object";

/// Header carrying the static API key on every request
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Environment variable consulted when a source omits `apiKey`
pub const API_KEY_ENV: &str = "MICROCMS_API_KEY";

/// Namespace tag prefixed to every collection type name
pub const TYPE_NAME_PREFIX: &str = "microcms";

// Wire field names of the remote list payload
pub const CONTENTS_FIELD: &str = "contents";
pub const TOTAL_COUNT_FIELD: &str = "totalCount";

// Node field names
pub const NODE_ID_FIELD: &str = "id";
pub const SOURCE_ID_FIELD: &str = "microcmsId";

pub const DEFAULT_CONFIG_PATH: &str = "microcms.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Build the resource URL for a service, API version and endpoint
pub fn base_url(service_id: &str, version: u32, endpoint: &str) -> String {
    format!("https://{}.microcms.io/api/v{}/{}", service_id, version, endpoint)
}

/// Derive the collection type name for an endpoint: `articles` -> `microcmsArticles`
pub fn type_name_for(endpoint: &str) -> String {
    let mut chars = endpoint.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{}{}", TYPE_NAME_PREFIX, capitalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_interpolates_all_parts() {
        assert_eq!(
            base_url("demo", 2, "news"),
            "https://demo.microcms.io/api/v2/news"
        );
    }

    #[test]
    fn test_type_name_capitalizes_first_char_only() {
        assert_eq!(type_name_for("articles"), "microcmsArticles");
        assert_eq!(type_name_for("blogPosts"), "microcmsBlogPosts");
        assert_eq!(type_name_for("x"), "microcmsX");
    }
}
