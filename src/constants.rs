pub mod permissions {

    pub const ANALYST: &[&str] = &[
        "investigation:read",
        "investigation:create",
        "email:investigate",
        "social:investigate",
    ];

    pub const ADMIN: &[&str] = &[
        "investigation:read",
        "investigation:create",
        "investigation:update",
        "investigation:delete",
        "email:investigate",
        "social:investigate",
        "domain:investigate",
        "search:query",
        "phone:investigate",
        "image:analyze",
        "export:create",
        "admin:users",
        "admin:audit",
        "admin:metrics",
    ];
}

pub mod crypto {

    pub const SALT_BYTES: usize = 16;

    pub const DERIVED_KEY_BYTES: usize = 32;

    pub const TOKEN_BYTES: usize = 32;
}

pub mod latency {
    use std::time::Duration;

    pub const SHORT: Duration = Duration::from_millis(1000);

    pub const MEDIUM: Duration = Duration::from_millis(1500);

    pub const LONG: Duration = Duration::from_millis(2000);

    pub const SLOW: Duration = Duration::from_millis(3000);
}

pub mod limits {

    pub const MAX_BULK_DOMAINS: usize = 50;

    pub const MAX_BULK_IMAGES: usize = 50;

    pub const MAX_INVESTIGATION_NAME: usize = 200;

    pub const MAX_QUERY_LENGTH: usize = 512;
}
