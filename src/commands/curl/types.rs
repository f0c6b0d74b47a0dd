/// Types for curl command

#[derive(Debug, Clone)]
pub struct CurlOptions {
    pub url: Option<String>,
    pub method: String,
    /// In insertion order; a repeated name replaces the earlier value
    pub headers: Vec<(String, String)>,
    pub data: Option<String>,
    /// Path of a virtual file sent as the body
    pub upload_file: Option<String>,
    pub user: Option<String>,
    /// Skip the request summary printed before sending
    pub silent: bool,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            url: None,
            method: "GET".to_string(),
            headers: Vec::new(),
            data: None,
            upload_file: None,
            user: None,
            silent: false,
        }
    }
}

impl CurlOptions {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }
}
