//! Everything a request handler usually needs.

pub use crate::core::{EntityMeta, Result, StoreError};
pub use crate::journey::flows::FlowState;
pub use crate::journey::{JourneyMap, JourneyPaths};
pub use crate::model::*;
pub use crate::pagination::{PageLinks, Paginator, Results, page_links, paginate};
pub use crate::presenter::{
    Cell, MovePresenter, NoticePresenter, PatientPresenter, Presenter, SessionPresenter,
    TableRow, UploadPresenter, UserPresenter,
};
pub use crate::relation::{resolve, resolve_many, sort_by_name};
pub use crate::store::{FindOptions, Patch, Repository, RepositoryExt, Store, StoreConfig};
