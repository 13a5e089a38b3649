//! Directory Sync API.

use workos_types::directory_sync::{Directory, DirectoryGroup, DirectoryUser};
use workos_types::{ListResponse, Order};

use crate::client::{ApiRequest, Query, WorkosClient};
use crate::error::WorkosError;

/// Filters for [`DirectorySync::list_users`].
#[derive(Debug, Clone, Default)]
pub struct ListUsersOpts {
    pub directory: Option<String>,

    /// Only members of this group
    pub group: Option<String>,

    /// Defaults to 10
    pub limit: Option<u32>,

    pub order: Order,

    pub before: Option<String>,

    pub after: Option<String>,
}

/// Filters for [`DirectorySync::list_groups`].
#[derive(Debug, Clone, Default)]
pub struct ListGroupsOpts {
    pub directory: Option<String>,

    /// Only groups this user belongs to
    pub user: Option<String>,

    pub limit: Option<u32>,

    pub order: Order,

    pub before: Option<String>,

    pub after: Option<String>,
}

/// Filters for [`DirectorySync::list_directories`].
#[derive(Debug, Clone, Default)]
pub struct ListDirectoriesOpts {
    pub domain: Option<String>,

    /// Free text matched against directory names
    pub search: Option<String>,

    pub organization_id: Option<String>,

    pub limit: Option<u32>,

    pub order: Order,

    pub before: Option<String>,

    pub after: Option<String>,
}

/// Directory Sync endpoints, obtained from [`WorkosClient::directory_sync`].
#[derive(Debug, Clone, Copy)]
pub struct DirectorySync<'a> {
    client: &'a WorkosClient,
}

impl<'a> DirectorySync<'a> {
    pub(crate) fn new(client: &'a WorkosClient) -> Self {
        Self { client }
    }

    pub async fn list_users(
        &self,
        opts: &ListUsersOpts,
    ) -> Result<ListResponse<DirectoryUser>, WorkosError> {
        let query = Query::new()
            .push_opt("directory", opts.directory.as_deref())
            .push_opt("group", opts.group.as_deref());
        let query = query.page(opts.limit, opts.order, opts.before.as_deref(), opts.after.as_deref());

        self.client
            .send(ApiRequest::get(&["directory_users"]).query(query))
            .await
    }

    pub async fn list_groups(
        &self,
        opts: &ListGroupsOpts,
    ) -> Result<ListResponse<DirectoryGroup>, WorkosError> {
        let query = Query::new()
            .push_opt("directory", opts.directory.as_deref())
            .push_opt("user", opts.user.as_deref());
        let query = query.page(opts.limit, opts.order, opts.before.as_deref(), opts.after.as_deref());

        self.client
            .send(ApiRequest::get(&["directory_groups"]).query(query))
            .await
    }

    pub async fn get_user(&self, user: &str) -> Result<DirectoryUser, WorkosError> {
        self.client
            .send(ApiRequest::get(&["directory_users", user]))
            .await
    }

    pub async fn get_group(&self, group: &str) -> Result<DirectoryGroup, WorkosError> {
        self.client
            .send(ApiRequest::get(&["directory_groups", group]))
            .await
    }

    pub async fn list_directories(
        &self,
        opts: &ListDirectoriesOpts,
    ) -> Result<ListResponse<Directory>, WorkosError> {
        let query = Query::new()
            .push_opt("domain", opts.domain.as_deref())
            .push_opt("search", opts.search.as_deref())
            .push_opt("organization_id", opts.organization_id.as_deref());
        let query = query.page(opts.limit, opts.order, opts.before.as_deref(), opts.after.as_deref());

        self.client
            .send(ApiRequest::get(&["directories"]).query(query))
            .await
    }

    pub async fn get_directory(&self, directory: &str) -> Result<Directory, WorkosError> {
        self.client
            .send(ApiRequest::get(&["directories", directory]))
            .await
    }

    pub async fn delete_directory(&self, directory: &str) -> Result<(), WorkosError> {
        self.client
            .send_empty(ApiRequest::delete(&["directories", directory]))
            .await
    }
}
