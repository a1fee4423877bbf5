//! URL building for the main API and the AI server.
//!
//! Path segments are percent-encoded one by one, so category names with
//! Hangul or a `/` in them stay a single segment.

use reqwest::Url;
use store::config::ApiConfig;

use crate::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct Endpoints {
    api: Url,
    ai: Url,
}

fn parse_base(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: "cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

impl Endpoints {
    pub fn new(api_base: &str, ai_base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api: parse_base(api_base)?,
            ai: parse_base(ai_base)?,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        Self::new(&config.base_url, &config.ai_base_url)
    }

    fn api(&self, segments: &[&str]) -> Url {
        with_segments(&self.api, segments)
    }

    pub fn login(&self) -> Url {
        self.api(&["auth", "login"])
    }

    pub fn signup(&self) -> Url {
        self.api(&["auth", "signup"])
    }

    pub fn logout(&self) -> Url {
        self.api(&["auth", "logout"])
    }

    pub fn session(&self) -> Url {
        self.api(&["auth", "session"])
    }

    pub fn preferences(&self, user_id: i64) -> Url {
        self.api(&["users", &user_id.to_string(), "preferences"])
    }

    pub fn personalized(&self, user_id: i64) -> Url {
        self.api(&["ai", "recommendations", "personalized", &user_id.to_string()])
    }

    pub fn meetings(&self) -> Url {
        self.api(&["meetings"])
    }

    pub fn meeting_search(&self) -> Url {
        self.api(&["meetings", "search"])
    }

    pub fn meeting(&self, meeting_id: i64) -> Url {
        self.api(&["meetings", &meeting_id.to_string()])
    }

    pub fn join(&self, meeting_id: i64) -> Url {
        self.api(&["meetings", &meeting_id.to_string(), "join"])
    }

    pub fn category(&self, category: &str, subcategory: Option<&str>) -> Url {
        match subcategory {
            Some(sub) => self.api(&["meetings", "category", category, "subcategory", sub]),
            None => self.api(&["meetings", "category", category]),
        }
    }

    pub fn ai_search(&self) -> Url {
        with_segments(&self.ai, &["ai", "recommendations", "search"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::from_config(&ApiConfig::default()).unwrap()
    }

    #[test]
    fn test_default_endpoints() {
        let e = endpoints();
        assert_eq!(e.login().as_str(), "http://localhost:8080/api/auth/login");
        assert_eq!(e.session().as_str(), "http://localhost:8080/api/auth/session");
        assert_eq!(e.meeting(12).as_str(), "http://localhost:8080/api/meetings/12");
        assert_eq!(e.join(12).as_str(), "http://localhost:8080/api/meetings/12/join");
        assert_eq!(e.preferences(3).as_str(), "http://localhost:8080/api/users/3/preferences");
        assert_eq!(
            e.personalized(3).as_str(),
            "http://localhost:8080/api/ai/recommendations/personalized/3"
        );
        assert_eq!(
            e.ai_search().as_str(),
            "http://localhost:8000/api/ai/recommendations/search"
        );
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let e = Endpoints::new("https://itda.kr/api/", "https://ai.itda.kr/").unwrap();
        assert_eq!(e.meetings().as_str(), "https://itda.kr/api/meetings");
        assert_eq!(e.ai_search().as_str(), "https://ai.itda.kr/ai/recommendations/search");
    }

    #[test]
    fn test_category_segments_are_encoded() {
        let e = endpoints();
        assert_eq!(
            e.category("food", None).as_str(),
            "http://localhost:8080/api/meetings/category/food"
        );
        assert_eq!(
            e.category("arts/crafts", Some("pottery")).as_str(),
            "http://localhost:8080/api/meetings/category/arts%2Fcrafts/subcategory/pottery"
        );
        let hangul = e.category("스포츠", None);
        assert!(hangul.as_str().starts_with("http://localhost:8080/api/meetings/category/%"));
        assert_eq!(hangul.path_segments().unwrap().count(), 4);
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            Endpoints::new("not a url", "http://localhost:8000/api"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(Endpoints::new("mailto:team@itda.kr", "http://localhost:8000/api").is_err());
    }
}
