use unirecords_models::{AcademicSession, CreateSessionInput, SessionId, UpdateSessionInput};

use super::service::SessionService;
use super::{ACTIVATE_SESSION, CREATE_SESSION, DELETE_SESSION, UPDATE_SESSION};
use crate::actions::{ActionResult, Actions, acknowledged};
use crate::routes;

impl Actions {
    pub async fn create_session(
        &self,
        input: &CreateSessionInput,
    ) -> ActionResult<AcademicSession> {
        self.run(
            CREATE_SESSION,
            input,
            SessionService::create_session(self.api(), input),
            |_| vec![routes::SESSIONS.to_string()],
        )
        .await
    }

    pub async fn update_session(
        &self,
        session_id: &SessionId,
        input: &UpdateSessionInput,
    ) -> ActionResult<AcademicSession> {
        self.run(
            UPDATE_SESSION,
            input,
            SessionService::update_session(self.api(), session_id, input),
            |_| vec![routes::SESSIONS.to_string()],
        )
        .await
    }

    pub async fn delete_session(&self, session_id: &SessionId) -> ActionResult<()> {
        let result = self
            .perform(
                DELETE_SESSION,
                SessionService::delete_session(self.api(), session_id),
                |_| vec![routes::SESSIONS.to_string()],
            )
            .await;
        acknowledged(result)
    }

    pub async fn activate_session(&self, session_id: &SessionId) -> ActionResult<()> {
        let result = self
            .perform(
                ACTIVATE_SESSION,
                SessionService::activate_session(self.api(), session_id),
                |_| vec![routes::SESSIONS.to_string(), routes::DASHBOARD.to_string()],
            )
            .await;
        acknowledged(result)
    }
}
