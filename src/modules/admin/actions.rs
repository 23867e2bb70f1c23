use unirecords_models::{AdminUser, BanUserInput, CreateUserInput, UpdateUserInput, UserId};

use super::service::AdminService;
use super::{
    BAN_USER, CREATE_USER, DELETE_USER, IMPERSONATE_USER, STOP_IMPERSONATION, UNBAN_USER,
    UPDATE_USER,
};
use crate::actions::{ActionResult, Actions, acknowledged};
use crate::routes;

impl Actions {
    pub async fn create_user(&self, input: &CreateUserInput) -> ActionResult<AdminUser> {
        self.run(
            CREATE_USER,
            input,
            AdminService::create_user(self.api(), input),
            |_| user_pages(),
        )
        .await
    }

    pub async fn update_user(
        &self,
        user_id: &UserId,
        input: &UpdateUserInput,
    ) -> ActionResult<AdminUser> {
        self.run(
            UPDATE_USER,
            input,
            AdminService::update_user(self.api(), user_id, input),
            |_| user_pages(),
        )
        .await
    }

    pub async fn delete_user(&self, user_id: &UserId) -> ActionResult<()> {
        let result = self
            .perform(
                DELETE_USER,
                AdminService::delete_user(self.api(), user_id),
                |_| user_pages(),
            )
            .await;
        acknowledged(result)
    }

    pub async fn ban_user(&self, input: &BanUserInput) -> ActionResult<()> {
        let result = self
            .run(
                BAN_USER,
                input,
                AdminService::ban_user(self.api(), input),
                |_| user_pages(),
            )
            .await;
        acknowledged(result)
    }

    pub async fn unban_user(&self, user_id: &UserId) -> ActionResult<()> {
        let result = self
            .perform(
                UNBAN_USER,
                AdminService::unban_user(self.api(), user_id),
                |_| user_pages(),
            )
            .await;
        acknowledged(result)
    }

    pub async fn impersonate_user(&self, user_id: &UserId) -> ActionResult<()> {
        let result = self
            .perform(
                IMPERSONATE_USER,
                AdminService::impersonate(self.api(), user_id),
                |_| vec![routes::DASHBOARD.to_string()],
            )
            .await;
        acknowledged(result)
    }

    pub async fn stop_impersonation(&self) -> ActionResult<()> {
        let result = self
            .perform(
                STOP_IMPERSONATION,
                AdminService::stop_impersonation(self.api()),
                |_| vec![routes::DASHBOARD.to_string()],
            )
            .await;
        acknowledged(result)
    }
}

fn user_pages() -> Vec<String> {
    vec![routes::ADMIN_USERS.to_string(), routes::DASHBOARD.to_string()]
}
