use std::str::FromStr;

/// The four fixed buckets backing the site's image assets.
///
/// Remote names must match the storage service exactly, including the
/// capitalized `Team` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetBucket {
    BlogImages,
    Gallery,
    GeneralImages,
    Team,
}

impl AssetBucket {
    pub const ALL: [AssetBucket; 4] = [
        AssetBucket::BlogImages,
        AssetBucket::Gallery,
        AssetBucket::GeneralImages,
        AssetBucket::Team,
    ];

    /// The bucket name on the remote service.
    pub fn remote_name(&self) -> &'static str {
        match self {
            AssetBucket::BlogImages => "blog-images",
            AssetBucket::Gallery => "gallery",
            AssetBucket::GeneralImages => "images",
            AssetBucket::Team => "Team",
        }
    }

    /// Redundant folder prefixes callers may carry on a path for this
    /// category. Stripped case-sensitively, at most once, leading-slash
    /// variant first.
    pub fn known_prefixes(&self) -> [&'static str; 2] {
        match self {
            AssetBucket::BlogImages => ["/blog-images/", "blog-images/"],
            AssetBucket::Gallery => ["/Gallery/", "Gallery/"],
            AssetBucket::GeneralImages => ["/Images/", "Images/"],
            AssetBucket::Team => ["/Team/", "Team/"],
        }
    }
}

impl std::fmt::Display for AssetBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.remote_name())
    }
}

impl FromStr for AssetBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" | "blog-images" => Ok(AssetBucket::BlogImages),
            "gallery" => Ok(AssetBucket::Gallery),
            "general" | "images" => Ok(AssetBucket::GeneralImages),
            "team" | "Team" => Ok(AssetBucket::Team),
            other => Err(format!(
                "unknown asset category '{}' (expected blog, gallery, general or team)",
                other
            )),
        }
    }
}
