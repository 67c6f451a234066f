//! MIME message assembly on top of lettre

use crate::error::{Error, Result};
use base64::Engine as _;
use lettre::message::header::{ContentType, HeaderName, HeaderValue};
use lettre::message::{Mailbox, Message, MultiPart, SinglePart};
use std::path::Path;

/// How an attachment is presented to the reader
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Disposition {
    /// Offered as a download
    #[default]
    Attachment,
    /// Embedded in the HTML body, referenced as `cid:<content_id>`
    Inline {
        /// Content-ID the HTML refers to
        content_id: String,
    },
}

/// A file attached to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name shown to the recipient
    pub filename: String,
    /// Raw file contents
    pub content: Vec<u8>,
    /// MIME type; guessed from the file name when unset
    pub content_type: Option<String>,
    /// Attachment or inline
    pub disposition: Disposition,
}

impl Attachment {
    /// Create an attachment from in-memory contents
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            content_type: None,
            disposition: Disposition::Attachment,
        }
    }

    /// Read an attachment from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        Ok(Self::new(filename, content))
    }

    /// Set an explicit MIME type
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Present inline under `content_id`
    #[must_use]
    pub fn inline(mut self, content_id: impl Into<String>) -> Self {
        self.disposition = Disposition::Inline {
            content_id: content_id.into(),
        };
        self
    }

    /// Effective MIME type
    pub fn mime_type(&self) -> String {
        match &self.content_type {
            Some(content_type) => content_type.clone(),
            None => mime_guess::from_path(&self.filename)
                .first_or_octet_stream()
                .to_string(),
        }
    }

    fn to_part(&self) -> Result<SinglePart> {
        let mime = self.mime_type();
        let content_type = ContentType::parse(&mime)
            .map_err(|e| Error::message(format!("invalid content type '{mime}': {e}")))?;
        let part = match &self.disposition {
            Disposition::Attachment => lettre::message::Attachment::new(self.filename.clone()),
            Disposition::Inline { content_id } => {
                lettre::message::Attachment::new_inline(content_id.clone())
            }
        };
        Ok(part.body(self.content.clone(), content_type))
    }
}

/// Structured fields of an outgoing email
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: Option<String>,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: Option<String>,
    pub html: Option<String>,
    pub text: Option<String>,
    pub headers: Vec<(String, String)>,
    pub attachments: Vec<Attachment>,
}

impl EmailMessage {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender
    #[must_use]
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Add a recipient
    #[must_use]
    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to.push(to.into());
        self
    }

    /// Add a carbon-copy recipient
    #[must_use]
    pub fn cc(mut self, cc: impl Into<String>) -> Self {
        self.cc.push(cc.into());
        self
    }

    /// Set the subject
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the HTML body
    #[must_use]
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set the plain-text alternative
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a custom header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add an attachment
    #[must_use]
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Serialize to RFC 5322 bytes
    pub fn to_mime(&self) -> Result<Vec<u8>> {
        let from = self.from.as_deref().ok_or_else(|| required("from"))?;
        if self.to.is_empty() {
            return Err(required("to"));
        }
        let html = self.html.as_deref().ok_or_else(|| required("html"))?;

        let mut builder = Message::builder().from(parse_mailbox(from)?);
        for to in &self.to {
            builder = builder.to(parse_mailbox(to)?);
        }
        for cc in &self.cc {
            builder = builder.cc(parse_mailbox(cc)?);
        }
        if let Some(subject) = &self.subject {
            builder = builder.subject(subject.clone());
        }
        for (name, value) in &self.headers {
            let header_name = HeaderName::new_from_ascii(name.clone())
                .map_err(|e| Error::message(format!("invalid header name '{name}': {e}")))?;
            builder = builder.raw_header(HeaderValue::new(header_name, value.clone()));
        }

        let body = match &self.text {
            Some(text) => Body::Alternative(MultiPart::alternative_plain_html(
                text.clone(),
                html.to_string(),
            )),
            None => Body::Single(SinglePart::html(html.to_string())),
        };

        let message = if self.attachments.is_empty() {
            match body {
                Body::Single(part) => builder.singlepart(part),
                Body::Alternative(multipart) => builder.multipart(multipart),
            }
        } else {
            let mut mixed = match body {
                Body::Single(part) => MultiPart::mixed().singlepart(part),
                Body::Alternative(multipart) => MultiPart::mixed().multipart(multipart),
            };
            for attachment in &self.attachments {
                mixed = mixed.singlepart(attachment.to_part()?);
            }
            builder.multipart(mixed)
        }
        .map_err(|e| Error::message(e.to_string()))?;

        Ok(message.formatted())
    }

    /// Serialize and base64 encode
    pub fn build(&self) -> Result<String> {
        Ok(base64::engine::general_purpose::STANDARD.encode(self.to_mime()?))
    }
}

enum Body {
    Single(SinglePart),
    Alternative(MultiPart),
}

fn required(field: &str) -> Error {
    Error::validation(format!("{field} is required."))
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address
        .parse()
        .map_err(|e| Error::message(format!("invalid address '{address}': {e}")))
}
