use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// MIME type attached to every rendered resume page.
pub const PAGE_MIME_TYPE: &str = "image/jpeg";

/// A base64-encoded page raster ready to be sent inline to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub mime_type: String,
    /// Standard-alphabet base64 of the encoded image bytes.
    pub data: String,
}

/// An uploaded resume file as received from the form.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Current form values for one review interaction. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub job_description: String,
    pub resume: Option<UploadedResume>,
}

impl Submission {
    /// The uploaded resume, if a non-empty file was sent.
    pub fn uploaded_resume(&self) -> Option<&UploadedResume> {
        self.resume.as_ref().filter(|r| !r.bytes.is_empty())
    }

    pub fn resume_file_name(&self) -> Option<&str> {
        self.resume.as_ref().map(|r| r.file_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_upload_without_resume() {
        let submission = Submission {
            job_description: "Rust engineer".to_string(),
            resume: None,
        };
        assert!(submission.uploaded_resume().is_none());
    }

    #[test]
    fn test_empty_file_is_not_an_upload() {
        let submission = Submission {
            job_description: String::new(),
            resume: Some(UploadedResume {
                file_name: "resume.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
                bytes: Bytes::new(),
            }),
        };
        assert!(submission.uploaded_resume().is_none());
        assert_eq!(submission.resume_file_name(), Some("resume.pdf"));
    }
}
