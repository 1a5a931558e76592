use super::{Cell, NOT_PROVIDED, Presenter, TableRow, format};
use crate::model::{Team, User};
use crate::relation::{resolve_many, sort_by_name};
use crate::store::Repository;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPresenter {
    pub id: String,
    pub uri: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub teams: String,
}

impl Presenter for UserPresenter {
    type Source = User;

    fn present<R: Repository + ?Sized>(user: User, repo: &R) -> Self {
        let mut teams = resolve_many::<Team, R>(repo, &user.team_ids);
        sort_by_name(&mut teams, |team| team.name.as_str());
        let team_names: Vec<String> = teams.into_iter().map(|team| team.name).collect();

        Self {
            id: user.meta.id.clone(),
            uri: format!("/users/{}", user.meta.id),
            full_name: user.full_name(),
            email: user.email.clone().unwrap_or_else(|| NOT_PROVIDED.to_string()),
            role: user.role.label().to_string(),
            teams: format::join_list(&team_names),
        }
    }

    fn table_row(&self) -> TableRow {
        vec![
            Cell::link("Name", self.full_name.clone(), self.uri.clone()),
            Cell::new("Email address", self.email.clone()),
            Cell::new("Role", self.role.clone()),
            Cell::new("Teams", self.teams.clone()),
        ]
    }
}
