use super::types::Category;

pub fn default_version() -> u32 {
    1
}

pub fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

pub fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

pub fn default_max_chunk_chars() -> usize {
    6000
}

pub fn default_concurrency() -> usize {
    4
}

pub fn default_timeout_sec() -> u64 {
    60
}

pub fn default_max_tokens() -> u32 {
    1024
}

pub fn default_temperature() -> f32 {
    0.2
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_backoff_base_ms() -> u64 {
    500
}

/// Category scaffold written by `clauselens init`. The keyword lists also
/// drive the offline keyword client.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category {
            name: "privacy".to_string(),
            focus: "privacy, data collection, tracking, and cookies".to_string(),
            keywords: vec![
                "privacy".to_string(),
                "data".to_string(),
                "personal information".to_string(),
                "personal info".to_string(),
                "tracking".to_string(),
                "cookies".to_string(),
            ],
        },
        Category {
            name: "liability".to_string(),
            focus: "liability waivers, arbitration, and dispute resolution".to_string(),
            keywords: vec![
                "liability".to_string(),
                "arbitration".to_string(),
                "dispute".to_string(),
            ],
        },
        Category {
            name: "termination".to_string(),
            focus: "account termination and suspension".to_string(),
            keywords: vec!["termination".to_string(), "terminate".to_string()],
        },
        Category {
            name: "billing".to_string(),
            focus: "fees, billing, and renewals".to_string(),
            keywords: vec!["fees".to_string(), "billing".to_string()],
        },
        Category {
            name: "third-party".to_string(),
            focus: "sharing with third parties".to_string(),
            keywords: vec!["third party".to_string(), "third-party".to_string()],
        },
    ]
}
