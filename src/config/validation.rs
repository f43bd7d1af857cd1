//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Largest page size the listing endpoint accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_user_agent(&config.network.user_agent)?;
    validate_api_base_url(&config.network.api_base_url)?;
    validate_options(config)?;

    match config.target.uid.as_deref() {
        Some(uid) => {
            parse_uid(uid)?;
        }
        None => {
            return Err(Error::MissingConfig(
                "uid (a user ID or profile link is required)".to_string(),
            ))
        }
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }
    Ok(())
}

/// Validate the listing endpoint URL.
pub fn validate_api_base_url(api_base_url: &str) -> Result<()> {
    let url = url::Url::parse(api_base_url)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "api_base_url".to_string(),
            message: format!("Unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(())
}

/// Validate numeric options.
pub fn validate_options(config: &Config) -> Result<()> {
    let page_size = config.options.page_size;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: format!(
                "Page size must be between 1 and {} (got {})",
                MAX_PAGE_SIZE, page_size
            ),
        });
    }

    if config.options.max_retries == 0 {
        return Err(Error::ConfigValidation {
            field: "max_retries".to_string(),
            message: "At least one download attempt is required".to_string(),
        });
    }

    Ok(())
}

/// Extract a numeric user ID from a bare ID or a profile link.
///
/// Accepted forms:
/// - `12345`
/// - `https://www.miyoushe.com/ys/accountCenter/postList?id=12345`
/// - `https://www.miyoushe.com/ys/home/12345`
pub fn parse_uid(input: &str) -> Result<String> {
    let input = input.trim();

    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        return Ok(input.to_string());
    }

    let patterns = [
        r"accountCenter/postList\?id=(\d+)",
        r"miyoushe\.com/[^/]+/home/(\d+)",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).map_err(|e| Error::Config(e.to_string()))?;
        if let Some(id) = re.captures(input).and_then(|c| c.get(1)) {
            return Ok(id.as_str().to_string());
        }
    }

    Err(Error::InvalidIdentifier(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uid_direct() {
        assert_eq!(parse_uid("12345").unwrap(), "12345");
        assert_eq!(parse_uid("  12345 ").unwrap(), "12345");
    }

    #[test]
    fn test_parse_uid_account_center_link() {
        let url = "https://www.miyoushe.com/ys/accountCenter/postList?id=288909600";
        assert_eq!(parse_uid(url).unwrap(), "288909600");
    }

    #[test]
    fn test_parse_uid_home_link() {
        let url = "https://www.miyoushe.com/sr/home/75276539";
        assert_eq!(parse_uid(url).unwrap(), "75276539");
    }

    #[test]
    fn test_parse_uid_invalid() {
        assert!(matches!(
            parse_uid("not-a-number"),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(parse_uid("").is_err());
        assert!(parse_uid("12a45").is_err());
        assert!(parse_uid("https://example.com/home/123").is_err());
    }

    #[test]
    fn test_validate_config_requires_uid() {
        let config = Config::default();
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_validate_config_ok() {
        let mut config = Config::default();
        config.target.uid = Some("12345".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_options_ranges() {
        let mut config = Config::default();
        config.target.uid = Some("12345".into());

        config.options.page_size = 0;
        assert!(validate_config(&config).is_err());

        config.options.page_size = 20;
        config.options.max_retries = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_api_base_url() {
        assert!(validate_api_base_url("https://bbs-api.miyoushe.com/post/wapi/userPost").is_ok());
        assert!(validate_api_base_url("ftp://example.com").is_err());
        assert!(validate_api_base_url("not a url").is_err());
    }
}
