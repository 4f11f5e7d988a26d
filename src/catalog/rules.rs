//! Built-in path classification tables.
//!
//! Globs without a `/` are matched against the basename; globs with a `/`
//! are matched as a suffix of the full path. Directory fragments are matched
//! anywhere in the path.

/// Basenames that are always allowed, even when another tier would match.
pub const EXCLUDE: &[&str] = &[".env.sample", ".env.example", ".env.template"];

/// Sensitive directory fragments.
pub const DIRECTORY_BLOCK: &[&str] = &[".ssh/", ".aws/", ".azure/", "gcloud/"];

/// Binary, encrypted or inherently credential-bearing files, by category.
pub const ALWAYS_BLOCK: &[(&str, &[&str])] = &[
    ("ssh_keys", &["id_rsa", "id_dsa", "id_ecdsa", "id_ed25519"]),
    (
        "certs",
        &["*.pem", "*.key", "*.p12", "*.pfx", "*.crt", "*.cer", "*.der"],
    ),
    ("database_binary", &["*.sqlite", "*.sqlite3", "*.db"]),
    (
        "crypto",
        &[
            "*.wallet",
            "wallet.dat",
            "*.keystore",
            "keystore.json",
            "*.mnemonic",
            "seed.txt",
            "private_key*",
            "privatekey*",
        ],
    ),
    (
        "credentials",
        &[
            ".aws/credentials",
            ".pgpass",
            ".my.cnf",
            ".mycnf",
            ".npmrc",
            ".pypirc",
            ".netrc",
            ".git-credentials",
            ".gitcredentials",
            ".boto",
            "credentials.csv",
            "*_accessKeys.csv",
            "gh_token",
            "github_token",
            "gitlab_token",
        ],
    ),
    ("tfstate", &["terraform.tfstate", "terraform.tfstate.*"]),
    ("rails", &["config/master.key", "config/credentials.yml.enc"]),
];

/// Text configs that may carry secrets and are handed to the content scanner.
pub const CONTENT_SCAN: &[(&str, &[&str])] = &[
    (
        "environment",
        &[".env", ".env.*", ".envrc", "*.secret", "*.secrets"],
    ),
    (
        "secret_configs",
        &[
            "secrets.yaml",
            "secrets.yml",
            "secrets.json",
            "secret.yaml",
            "secret.yml",
            "secret.json",
            "credentials.json",
            "*-credentials.json",
            "service-account*.json",
            "service_account*.json",
            "auth.json",
            "tokens.json",
            "*.token",
        ],
    ),
    (
        "cloud",
        &[
            ".aws/config",
            "aws_credentials",
            "azure.json",
            "azureProfile.json",
            "azure-pipelines-credentials.yml",
            "servicePrincipal.json",
            "application_default_credentials.json",
            "gcp*.json",
        ],
    ),
    ("docker", &[".docker/config.json", "docker-compose*.yml"]),
    (
        "database_config",
        &["database.yml", "database.yaml", "mongod.conf", "redis.conf"],
    ),
    (
        "cicd",
        &[
            ".circleci/config.yml",
            ".github/workflows/*.yml",
            "Jenkinsfile",
            ".gitlab-ci.yml",
            "bitbucket-pipelines.yml",
            "buildspec.yml",
            "cloudbuild.yaml",
            ".travis.yml",
        ],
    ),
    (
        "infrastructure",
        &[
            "kubeconfig",
            ".kube/config",
            "*.tfvars",
            "ansible.cfg",
            "vault.yml",
            "vault.yaml",
            "hub",
        ],
    ),
    (
        "app_config",
        &[
            "wp-config.php",
            "configuration.php",
            "settings.py",
            "local_settings.py",
            "production.py",
            "appsettings.json",
            "appsettings.*.json",
            "Web.config",
            "app.config",
        ],
    ),
    (
        "ide",
        &[
            ".idea/workspace.xml",
            ".vscode/settings.json",
            "*.sublime-workspace",
            ".atom/config.cson",
        ],
    ),
    ("ssh_meta", &["id_rsa.pub", "known_hosts", "authorized_keys"]),
];
