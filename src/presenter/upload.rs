use super::{Cell, NOT_PROVIDED, Presenter, TableRow, format};
use crate::model::{Location, Upload, UploadStatus, User};
use crate::relation::resolve;
use crate::store::Repository;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadPresenter {
    pub id: String,
    pub uri: String,
    pub kind: String,
    pub status: String,
    pub created: String,
    pub uploaded_by: String,
    pub school_name: Option<String>,
    pub record_count: usize,
    pub records: String,
    pub errors: Option<String>,
}

impl Presenter for UploadPresenter {
    type Source = Upload;

    fn present<R: Repository + ?Sized>(upload: Upload, repo: &R) -> Self {
        let user = resolve::<User, R>(repo, upload.meta.created_by_uid.as_deref());
        let school = resolve::<Location, R>(repo, upload.location_id.as_deref());
        let record_count = upload.patient_ids.len();
        let errors = match upload.status {
            UploadStatus::Invalid if upload.error_count > 0 => Some(format::plural(
                upload.error_count as usize,
                "error",
                "errors",
            )),
            _ => None,
        };

        Self {
            id: upload.meta.id.clone(),
            uri: format!("/uploads/{}", upload.meta.id),
            kind: upload.kind.label().to_string(),
            status: upload.status.label().to_string(),
            created: upload
                .meta
                .created_at
                .map(format::long_datetime)
                .unwrap_or_else(|| NOT_PROVIDED.to_string()),
            uploaded_by: user
                .map(|u| u.full_name())
                .unwrap_or_else(|| "Unknown user".to_string()),
            school_name: school.map(|s| s.name),
            record_count,
            records: format::plural(record_count, "record", "records"),
            errors,
        }
    }

    fn table_row(&self) -> TableRow {
        vec![
            Cell::link("Uploaded on", self.created.clone(), self.uri.clone()),
            Cell::new("Uploaded by", self.uploaded_by.clone()),
            Cell::new("Type", self.kind.clone()),
            Cell::new("Status", self.errors.clone().unwrap_or_else(|| self.status.clone())),
            Cell::new("Records", self.records.clone()),
        ]
    }
}
