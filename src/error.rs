use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a filesystem operation. Either one ends the session.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("cannot read folder {}: {source}", path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path_and_cause() {
        let err = OpError::Enumeration {
            path: PathBuf::from("/src/locked"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(
            err.to_string(),
            "cannot read folder /src/locked: permission denied"
        );

        let err = OpError::Copy {
            from: PathBuf::from("/src/a.txt"),
            to: PathBuf::from("/dst/a.txt"),
            source: io::Error::other("disk full"),
        };
        assert_eq!(
            err.to_string(),
            "cannot copy /src/a.txt to /dst/a.txt: disk full"
        );
    }
}
