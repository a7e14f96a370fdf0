use services::{SessionError, TransitionRejection};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NoActiveSession,
    NoResults,
    OutOfOrder,
    AlreadySubmitted,
    Unavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::NoActiveSession => "No quiz is in progress.",
            ViewError::NoResults => "Results are not available yet.",
            ViewError::OutOfOrder => "Sections must be taken in order.",
            ViewError::AlreadySubmitted => "This section has already been submitted.",
            ViewError::Unavailable => "That action is not available right now.",
        }
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::InvalidTransition(rejection) => match rejection {
                TransitionRejection::NotNextPending { .. } => ViewError::OutOfOrder,
                TransitionRejection::AlreadyCompleted(_) => ViewError::AlreadySubmitted,
                _ => ViewError::Unavailable,
            },
            _ => ViewError::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use quiz_core::model::TopicName;

    use super::*;

    #[test]
    fn rejections_map_to_messages() {
        let maths = TopicName::new("Maths").unwrap();
        let err = SessionError::from(TransitionRejection::AlreadyCompleted(maths.clone()));
        assert_eq!(ViewError::from(&err), ViewError::AlreadySubmitted);

        let err = SessionError::from(TransitionRejection::NotNextPending {
            requested: maths,
            expected: None,
        });
        assert_eq!(
            ViewError::from(&err).message(),
            "Sections must be taken in order."
        );
    }
}
