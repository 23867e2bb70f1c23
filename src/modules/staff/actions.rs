use unirecords_models::{BulkUploadResult, CreateStaffInput, Staff, StaffId, UpdateStaffInput};

use super::service::StaffService;
use super::{BULK_UPLOAD_STAFF, CREATE_STAFF, DELETE_STAFF, UPDATE_STAFF};
use crate::actions::{ActionResult, Actions, acknowledged};
use crate::routes;

impl Actions {
    pub async fn create_staff(&self, input: &CreateStaffInput) -> ActionResult<Staff> {
        self.run(
            CREATE_STAFF,
            input,
            StaffService::create_staff(self.api(), input),
            |_| vec![routes::STAFF.to_string()],
        )
        .await
    }

    pub async fn update_staff(
        &self,
        staff_id: &StaffId,
        input: &UpdateStaffInput,
    ) -> ActionResult<Staff> {
        self.run(
            UPDATE_STAFF,
            input,
            StaffService::update_staff(self.api(), staff_id, input),
            |_| {
                vec![
                    routes::STAFF.to_string(),
                    routes::staff_member(staff_id.as_str()),
                ]
            },
        )
        .await
    }

    pub async fn delete_staff(&self, staff_id: &StaffId) -> ActionResult<()> {
        let result = self
            .perform(
                DELETE_STAFF,
                StaffService::delete_staff(self.api(), staff_id),
                |_| vec![routes::STAFF.to_string()],
            )
            .await;
        acknowledged(result)
    }

    pub async fn bulk_upload_staff(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> ActionResult<BulkUploadResult> {
        if contents.is_empty() {
            return ActionResult::failure("No file provided");
        }
        self.perform(
            BULK_UPLOAD_STAFF,
            StaffService::bulk_upload(self.api(), file_name, contents),
            |_| vec![routes::STAFF.to_string()],
        )
        .await
    }
}
