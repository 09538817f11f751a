//! Host account commands

use schedulr_core::{HostProfileUpdate, NewHost};
use schedulr_domain::{Host, Result as DomainResult};
use uuid::Uuid;

use crate::utils::command_helpers::execute_command;
use crate::AppContext;

/// Register a host. The session layer maps the returned id to a login.
pub async fn register_host(ctx: &AppContext, new_host: NewHost) -> DomainResult<Host> {
    execute_command("hosts::register_host", || ctx.hosts.register(new_host)).await
}

pub async fn get_host(ctx: &AppContext, owner_id: Uuid) -> DomainResult<Host> {
    execute_command("hosts::get_host", || ctx.hosts.get(owner_id)).await
}

/// Change the owner's name, username or timezone.
pub async fn update_host_profile(
    ctx: &AppContext,
    owner_id: Uuid,
    update: HostProfileUpdate,
) -> DomainResult<Host> {
    execute_command("hosts::update_host_profile", || ctx.hosts.update_profile(owner_id, update))
        .await
}

/// Administrative listing of every host account.
pub async fn list_hosts(ctx: &AppContext) -> DomainResult<Vec<Host>> {
    execute_command("hosts::list_hosts", || ctx.hosts.list_all()).await
}

/// Administrative enable/disable of a host account.
pub async fn toggle_host_active(ctx: &AppContext, host_id: Uuid) -> DomainResult<Host> {
    execute_command("hosts::toggle_host_active", || ctx.hosts.toggle_active(host_id)).await
}
