use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Summarize,
    Translate,
    Narrate,
    DetectOutfit,
    ConvertToImages,
    ConvertFromImages,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Summarize => "summarize",
            JobKind::Translate => "translate",
            JobKind::Narrate => "narrate",
            JobKind::DetectOutfit => "detect-outfit",
            JobKind::ConvertToImages => "convert-to-images",
            JobKind::ConvertFromImages => "convert-from-images",
        }
    }

    /// Whether this kind's intake accepts a file with the given MIME type.
    pub fn accepts_mime(&self, mime: &str) -> bool {
        match self {
            JobKind::Summarize
            | JobKind::Translate
            | JobKind::Narrate
            | JobKind::ConvertToImages => mime == "application/pdf",
            JobKind::DetectOutfit | JobKind::ConvertFromImages => mime.starts_with("image/"),
        }
    }

    /// Kinds that take a single PDF document also accept a `url:` reference
    /// resolved server-side.
    pub fn accepts_remote_input(&self) -> bool {
        matches!(
            self,
            JobKind::Summarize | JobKind::Translate | JobKind::Narrate | JobKind::ConvertToImages
        )
    }

    /// Kinds whose intake aggregates multiple files into one job.
    pub fn is_multi_file(&self) -> bool {
        matches!(self, JobKind::ConvertFromImages)
    }
}

impl FromStr for JobKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summarize" => Ok(JobKind::Summarize),
            "translate" => Ok(JobKind::Translate),
            "narrate" => Ok(JobKind::Narrate),
            "detect-outfit" => Ok(JobKind::DetectOutfit),
            "convert-to-images" => Ok(JobKind::ConvertToImages),
            "convert-from-images" => Ok(JobKind::ConvertFromImages),
            _ => Err(format!("Unknown job kind: {}", s)),
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
