use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn parse(reference: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Parse {
                reference: reference.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn no_such_book(versification: impl Into<String>, name: impl Into<String>) -> Error {
        Error(
            ErrorKind::NoSuchBook {
                versification: versification.into(),
                name: name.into(),
            }
            .into(),
        )
    }

    pub fn no_such_verse(
        versification: impl Into<String>,
        book: impl Into<String>,
        chapter: u16,
        verse: u16,
    ) -> Error {
        Error(
            ErrorKind::NoSuchVerse {
                versification: versification.into(),
                book: book.into(),
                chapter,
                verse,
            }
            .into(),
        )
    }

    pub fn unknown_versification(name: impl Into<String>) -> Error {
        Error(ErrorKind::UnknownVersification { name: name.into() }.into())
    }

    pub fn malformed_description(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::MalformedDescription {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn unknown_book_id(osis: impl Into<String>) -> Error {
        Error(ErrorKind::UnknownBookId { osis: osis.into() }.into())
    }

    pub fn malformed_config(line: usize, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::MalformedConfig {
                line,
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn missing_config(key: impl Into<String>) -> Error {
        Error(ErrorKind::MissingConfig { key: key.into() }.into())
    }

    pub fn key_not_present(key: impl Into<String>) -> Error {
        Error(ErrorKind::KeyNotPresent { key: key.into() }.into())
    }

    pub fn corrupt_data(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::CorruptData {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    /// True for the one recoverable, expected storage condition: a valid
    /// address with no text behind it.
    pub fn is_key_not_present(&self) -> bool {
        matches!(self.kind(), ErrorKind::KeyNotPresent { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("failed to parse reference '{reference}': {message}")]
    Parse { reference: String, message: String },

    #[error("no book named '{name}' in versification '{versification}'")]
    NoSuchBook {
        versification: String,
        name: String,
    },

    #[error("no verse {book} {chapter}:{verse} in versification '{versification}'")]
    NoSuchVerse {
        versification: String,
        book: String,
        chapter: u16,
        verse: u16,
    },

    #[error("unknown versification '{name}'")]
    UnknownVersification { name: String },

    #[error("malformed versification description '{name}': {message}")]
    MalformedDescription { name: String, message: String },

    #[error("unknown book id '{osis}'")]
    UnknownBookId { osis: String },

    #[error("malformed module config at line {line}: {message}")]
    MalformedConfig { line: usize, message: String },

    #[error("missing module config entry '{key}'")]
    MissingConfig { key: String },

    #[error("no text present for '{key}'")]
    KeyNotPresent { key: String },

    #[error("corrupt module data in '{element}': {message}")]
    CorruptData { element: String, message: String },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(_: std::convert::Infallible) -> Self {
        Error::invalid_operation("conversion")
    }
}
