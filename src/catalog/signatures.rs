//! Built-in credential signatures, as `(regex, description)` in scan order.
//!
//! The first signature that matches wins, so the more specific fixed-format
//! tokens come before the generic keyword assignments. Provider token
//! prefixes are case-sensitive; keyword assignments are `(?i)`.
//!
//! The generic assignment signatures carry a minimum value length (8 for
//! passwords, 12 for `secret`/`token`/`api_key` keys) so that
//! placeholders like `password: ""` or `secret: changeme` do not match.

pub const SIGNATURES: &[(&str, &str)] = &[
    // Service account / key material embedded in JSON
    (
        r#""type"\s*:\s*"service_account""#,
        "GCP service account JSON",
    ),
    (r#""private_key"\s*:"#, "Private key in JSON"),
    (r#""client_secret"\s*:"#, "Client secret in JSON"),
    // PEM
    (r"-----BEGIN.*PRIVATE KEY-----", "PEM private key"),
    // AWS
    (r"AKIA[0-9A-Z]{16}", "AWS access key ID"),
    (r"ASIA[0-9A-Z]{16}", "AWS temporary access key ID"),
    (
        r"(?i)aws_secret_access_key\s*[=:]\s*\S{20,}",
        "AWS secret access key",
    ),
    // AI providers
    (r"sk-ant-[A-Za-z0-9_\-]{32,}", "Anthropic API key"),
    (r"sk-proj-[A-Za-z0-9_\-]{40,}", "OpenAI project API key"),
    (r"sk-[a-zA-Z0-9]{48}", "OpenAI API key"),
    // Google
    (r"AIza[0-9A-Za-z\-_]{35}", "Google API key"),
    // VCS
    (r"ghp_[0-9a-zA-Z]{36}", "GitHub personal access token"),
    (r"github_pat_[0-9a-zA-Z_]{60,}", "GitHub fine-grained token"),
    (r"glpat-[0-9a-zA-Z\-]{20,}", "GitLab personal access token"),
    // SaaS
    (r"xox[abprs]-[0-9A-Za-z\-]{10,}", "Slack token"),
    (r"sk_live_[0-9a-zA-Z]{24,}", "Stripe live secret key"),
    // Generic assignments
    (
        r#"(?i)(password|passwd)\s*[=:]\s*["']?[^\s"'$\{]{8,}"#,
        "Hardcoded password",
    ),
    (
        r"(?i)(postgres(?:ql)?|mysql|mongodb(?:\+srv)?|redis|amqp)://[^\s:@/]*:[^\s@/]+@\S+",
        "Database connection URI",
    ),
    (
        r#"(?i)(password|secret|token|api_key):\s*["']?[^\s"'#$\{]{12,}"#,
        "Secret value in YAML/config",
    ),
    // `.env` style, including prefixed names such as API_TOKEN or CLIENT_SECRET
    (
        r#"(?i)(secret|token|api_?key)\s*[=:]\s*["']?[^\s"'#$\{]{12,}"#,
        "Secret assignment",
    ),
    (
        r#"(?i)ConnectionString\s*[=:]\s*["'][^"']{15,}"#,
        ".NET connection string",
    ),
    (
        r#"(?i)define\s*\(\s*['"]DB_PASSWORD"#,
        "WordPress DB password",
    ),
    (r#"(?i)SECRET_KEY\s*=\s*["']"#, "Django SECRET_KEY"),
];
