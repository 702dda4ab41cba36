use std::sync::Arc;

use glasspane_application::AccessService;
use glasspane_core::{AccountId, UserId};
use glasspane_domain::{
    Account, Dashboard, DashboardId, Instance, InstanceId, Report, ReportId, RoleName, UserRecord,
    Workspace, WorkspaceId,
};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use super::InMemoryAccessRepository;

fn account(id: i64, name: &str, subdomain: &str) -> Account {
    Account::new(AccountId::new(id), name, subdomain, true, None)
        .unwrap_or_else(|_| unreachable!())
}

fn user(id: i64, account_id: Option<i64>) -> UserRecord {
    UserRecord::new(
        UserId::new(id),
        account_id.map(AccountId::new),
        format!("user{id}@example.com"),
        true,
        None,
    )
    .unwrap_or_else(|_| unreachable!())
}

fn instance(id: i64) -> Instance {
    Instance::new(
        InstanceId::new(id),
        format!("instance-{id}"),
        format!("https://superset-{id}.example.com"),
        format!("vault:superset/{id}"),
        true,
        None,
    )
    .unwrap_or_else(|_| unreachable!())
}

fn workspace(id: i64, name: &str) -> Workspace {
    Workspace::new(WorkspaceId::new(id), name, true, None).unwrap_or_else(|_| unreachable!())
}

fn report(id: i64, workspace_id: i64, name: &str) -> Report {
    Report::new(
        ReportId::new(id),
        WorkspaceId::new(workspace_id),
        name,
        true,
        None,
    )
    .unwrap_or_else(|_| unreachable!())
}

fn dashboard(id: i64, report_id: i64, name: &str) -> Dashboard {
    Dashboard::new(
        DashboardId::new(id),
        ReportId::new(report_id),
        name,
        format!("ext-{id}"),
        Some(format!("embed-{id}")),
        true,
        None,
    )
    .unwrap_or_else(|_| unreachable!())
}

const ACME: AccountId = AccountId::new(10);
const GLOBEX: AccountId = AccountId::new(20);
const SALES_INSTANCE: InstanceId = InstanceId::new(1);
const GLOBEX_INSTANCE: InstanceId = InstanceId::new(2);
const SALES: WorkspaceId = WorkspaceId::new(100);
const Q1: ReportId = ReportId::new(200);
const REV: DashboardId = DashboardId::new(501);
const ACME_ADMIN: UserId = UserId::new(1);
const ACME_MEMBER: UserId = UserId::new(2);
const GLOBEX_MEMBER: UserId = UserId::new(3);
const ROOT: UserId = UserId::new(9);

/// Account "Acme" has workspace "Sales" enabled through its instance;
/// "Sales" contains report "Q1" with dashboard "Rev". "Globex" is linked to
/// its own instance but has nothing enabled.
async fn acme_fixture() -> Arc<InMemoryAccessRepository> {
    let repository = Arc::new(InMemoryAccessRepository::new());

    repository.insert_account(account(10, "Acme", "acme")).await;
    repository.insert_account(account(20, "Globex", "globex")).await;
    repository.insert_instance(instance(1)).await;
    repository.insert_instance(instance(2)).await;
    repository.link_account_instance(ACME, SALES_INSTANCE).await;
    repository.link_account_instance(GLOBEX, GLOBEX_INSTANCE).await;
    repository.insert_workspace(workspace(100, "Sales")).await;
    repository.enable_workspace(ACME, SALES_INSTANCE, SALES).await;
    repository.insert_report(report(200, 100, "Q1")).await;
    repository.insert_dashboard(dashboard(501, 200, "Rev")).await;

    repository.insert_user(user(1, Some(10))).await;
    repository.assign_role(ACME_ADMIN, RoleName::TenantAdmin).await;
    repository.insert_user(user(2, Some(10))).await;
    repository.assign_role(ACME_MEMBER, RoleName::User).await;
    repository.insert_user(user(3, Some(20))).await;
    repository.assign_role(GLOBEX_MEMBER, RoleName::User).await;
    repository.insert_user(user(9, None)).await;
    repository.assign_role(ROOT, RoleName::RootAdmin).await;

    repository
}

fn service(repository: &Arc<InMemoryAccessRepository>) -> AccessService {
    AccessService::new(repository.clone(), repository.clone())
}

async fn accessible_ids(service: &AccessService, user_id: UserId) -> Vec<DashboardId> {
    service
        .list_accessible_dashboards(user_id)
        .await
        .into_iter()
        .map(|context| context.dashboard.id())
        .collect()
}

#[tokio::test]
async fn scenario_a_admin_sees_enabled_dashboard_member_needs_grant() {
    let repository = acme_fixture().await;
    let service = service(&repository);

    assert!(service.can_access_dashboard(ACME_ADMIN, REV).await);
    assert!(!service.can_access_dashboard(ACME_MEMBER, REV).await);

    repository.grant_dashboard(ACME_MEMBER, REV).await;
    assert!(service.can_access_dashboard(ACME_MEMBER, REV).await);
}

#[tokio::test]
async fn scenario_b_workspace_deactivation_overrides_standing_grant() {
    let repository = acme_fixture().await;
    let service = service(&repository);
    repository.grant_dashboard(ACME_MEMBER, REV).await;
    assert!(service.can_access_dashboard(ACME_MEMBER, REV).await);

    repository.deactivate_workspace(SALES).await;

    assert!(!service.can_access_dashboard(ACME_MEMBER, REV).await);
    assert!(accessible_ids(&service, ACME_MEMBER).await.is_empty());
}

#[tokio::test]
async fn scenario_c_cross_tenant_assignment_is_denied() {
    let repository = acme_fixture().await;
    let service = service(&repository);

    assert!(!service.can_assign_dashboard(ACME_ADMIN, GLOBEX_MEMBER, REV).await);
}

#[tokio::test]
async fn root_admin_reaches_dashboards_no_tenant_has_enabled() {
    let repository = acme_fixture().await;
    let service = service(&repository);

    // A second workspace with no enablement anywhere.
    repository.insert_workspace(workspace(110, "Ops")).await;
    repository.insert_report(report(210, 110, "Health")).await;
    repository.insert_dashboard(dashboard(502, 210, "Uptime")).await;

    assert!(service.can_access_dashboard(ROOT, DashboardId::new(502)).await);
    assert!(!service.can_access_dashboard(ACME_ADMIN, DashboardId::new(502)).await);

    let ids = accessible_ids(&service, ROOT).await;
    assert_eq!(ids, vec![REV, DashboardId::new(502)]);
}

#[tokio::test]
async fn cross_tenant_grant_row_alone_opens_nothing() {
    let repository = acme_fixture().await;
    let service = service(&repository);

    repository.grant_dashboard(GLOBEX_MEMBER, REV).await;

    assert!(!service.can_access_dashboard(GLOBEX_MEMBER, REV).await);
    assert!(accessible_ids(&service, GLOBEX_MEMBER).await.is_empty());
}

#[tokio::test]
async fn every_ancestor_revokes_access_when_it_dies() {
    // Each case deadens one link of the chain and expects denial for every
    // role that could previously see the dashboard.
    for ancestor in ["account", "link", "enablement", "workspace", "report"] {
        let repository = acme_fixture().await;
        let service = service(&repository);
        repository.grant_dashboard(ACME_MEMBER, REV).await;
        assert!(service.can_access_dashboard(ACME_ADMIN, REV).await);
        assert!(service.can_access_dashboard(ACME_MEMBER, REV).await);

        match ancestor {
            "account" => repository.deactivate_account(ACME).await,
            "link" => repository.deactivate_instance_link(ACME, SALES_INSTANCE).await,
            "enablement" => {
                repository
                    .deactivate_enablement(ACME, SALES_INSTANCE, SALES)
                    .await;
            }
            "workspace" => repository.deactivate_workspace(SALES).await,
            _ => repository.soft_delete_report(Q1).await,
        }

        assert!(
            !service.can_access_dashboard(ACME_ADMIN, REV).await,
            "dead {ancestor} still grants admin access"
        );
        assert!(
            !service.can_access_dashboard(ACME_MEMBER, REV).await,
            "dead {ancestor} still grants member access"
        );
        assert!(accessible_ids(&service, ACME_ADMIN).await.is_empty());
        assert!(accessible_ids(&service, ACME_MEMBER).await.is_empty());
    }
}

#[tokio::test]
async fn dead_dashboard_disappears_for_root_admin_too() {
    let repository = acme_fixture().await;
    let service = service(&repository);
    assert!(service.can_access_dashboard(ROOT, REV).await);

    repository.deactivate_dashboard(REV).await;

    assert!(!service.can_access_dashboard(ROOT, REV).await);
    assert!(accessible_ids(&service, ROOT).await.is_empty());
}

#[tokio::test]
async fn tenant_listing_attaches_the_enabling_instance() {
    let repository = acme_fixture().await;
    let service = service(&repository);

    let listed = service.list_accessible_dashboards(ACME_ADMIN).await;
    assert_eq!(listed.len(), 1);
    let context = &listed[0];
    assert_eq!(context.report.id(), Q1);
    assert_eq!(context.workspace.id(), SALES);
    assert_eq!(
        context.instance.as_ref().map(Instance::id),
        Some(SALES_INSTANCE)
    );
}

#[tokio::test]
async fn root_listing_carries_no_tenant_instance() {
    let repository = acme_fixture().await;
    let service = service(&repository);

    let listed = service.list_accessible_dashboards(ROOT).await;
    assert_eq!(listed.len(), 1);
    assert!(listed[0].instance.is_none());
}

#[tokio::test]
async fn service_revocation_closes_access_on_next_check() {
    let repository = acme_fixture().await;
    let service = service(&repository);
    repository.grant_dashboard(ACME_MEMBER, REV).await;
    assert!(service.can_access_dashboard(ACME_MEMBER, REV).await);

    let result = service
        .revoke_dashboard_from_user(ACME_ADMIN, ACME_MEMBER, REV)
        .await;
    assert!(result.is_ok());

    assert!(!service.can_access_dashboard(ACME_MEMBER, REV).await);
    assert!(accessible_ids(&service, ACME_MEMBER).await.is_empty());
}

#[tokio::test]
async fn regrant_after_revocation_reactivates_the_same_row() {
    let repository = acme_fixture().await;
    let service = service(&repository);

    let granted = service
        .grant_dashboard_to_user(ACME_ADMIN, ACME_MEMBER, REV)
        .await;
    assert!(granted.is_ok());
    let revoked = service
        .revoke_dashboard_from_user(ACME_ADMIN, ACME_MEMBER, REV)
        .await;
    assert!(revoked.is_ok());
    let regranted = service
        .grant_dashboard_to_user(ACME_ADMIN, ACME_MEMBER, REV)
        .await;
    assert!(regranted.is_ok());

    assert!(service.can_access_dashboard(ACME_MEMBER, REV).await);
}

// ---------------------------------------------------------------------------
// Consistency property: listing membership equals the single check
// ---------------------------------------------------------------------------

const WORLD_ACCOUNTS: [i64; 2] = [1, 2];
const WORLD_WORKSPACES: [i64; 3] = [101, 102, 103];
const WORLD_REPORTS: [i64; 3] = [201, 202, 203];
const WORLD_DASHBOARDS: [i64; 6] = [301, 302, 303, 304, 305, 306];
const WORLD_USERS: [i64; 6] = [401, 402, 403, 404, 405, 406];

#[derive(Debug, Clone)]
struct WorldFlags {
    account_live: [bool; 2],
    link_live: [bool; 2],
    workspace_live: [bool; 3],
    /// Per account, per workspace: `None` means no enablement row,
    /// `Some(live)` an enablement row with that liveness.
    enablement: [[Option<bool>; 3]; 2],
    report_live: [bool; 3],
    dashboard_live: [bool; 6],
    user_live: [bool; 6],
    grants: Vec<(usize, usize)>,
}

fn world_strategy() -> impl Strategy<Value = WorldFlags> {
    (
        any::<[bool; 2]>(),
        any::<[bool; 2]>(),
        any::<[bool; 3]>(),
        any::<[[Option<bool>; 3]; 2]>(),
        any::<[bool; 3]>(),
        any::<[bool; 6]>(),
        any::<[bool; 6]>(),
        proptest::collection::vec((0..6_usize, 0..6_usize), 0..12),
    )
        .prop_map(
            |(
                account_live,
                link_live,
                workspace_live,
                enablement,
                report_live,
                dashboard_live,
                user_live,
                grants,
            )| WorldFlags {
                account_live,
                link_live,
                workspace_live,
                enablement,
                report_live,
                dashboard_live,
                user_live,
                grants,
            },
        )
}

async fn build_world(flags: &WorldFlags) -> Arc<InMemoryAccessRepository> {
    let repository = Arc::new(InMemoryAccessRepository::new());

    for (index, account_id) in WORLD_ACCOUNTS.iter().enumerate() {
        repository
            .insert_account(account(*account_id, &format!("Account {account_id}"), &format!("account-{account_id}")))
            .await;
        if !flags.account_live[index] {
            repository.deactivate_account(AccountId::new(*account_id)).await;
        }

        repository.insert_instance(instance(10 + *account_id)).await;
        repository
            .link_account_instance(AccountId::new(*account_id), InstanceId::new(10 + *account_id))
            .await;
        if !flags.link_live[index] {
            repository
                .deactivate_instance_link(AccountId::new(*account_id), InstanceId::new(10 + *account_id))
                .await;
        }
    }

    for (index, workspace_id) in WORLD_WORKSPACES.iter().enumerate() {
        repository
            .insert_workspace(workspace(*workspace_id, &format!("Workspace {workspace_id}")))
            .await;
        if !flags.workspace_live[index] {
            repository.deactivate_workspace(WorkspaceId::new(*workspace_id)).await;
        }

        repository
            .insert_report(report(WORLD_REPORTS[index], *workspace_id, &format!("Report {index}")))
            .await;
        if !flags.report_live[index] {
            repository.soft_delete_report(ReportId::new(WORLD_REPORTS[index])).await;
        }
    }

    for (account_index, account_id) in WORLD_ACCOUNTS.iter().enumerate() {
        for (workspace_index, workspace_id) in WORLD_WORKSPACES.iter().enumerate() {
            if let Some(live) = flags.enablement[account_index][workspace_index] {
                repository
                    .enable_workspace(
                        AccountId::new(*account_id),
                        InstanceId::new(10 + *account_id),
                        WorkspaceId::new(*workspace_id),
                    )
                    .await;
                if !live {
                    repository
                        .deactivate_enablement(
                            AccountId::new(*account_id),
                            InstanceId::new(10 + *account_id),
                            WorkspaceId::new(*workspace_id),
                        )
                        .await;
                }
            }
        }
    }

    for (index, dashboard_id) in WORLD_DASHBOARDS.iter().enumerate() {
        // Two dashboards per report.
        repository
            .insert_dashboard(dashboard(*dashboard_id, WORLD_REPORTS[index / 2], &format!("Dashboard {index}")))
            .await;
        if !flags.dashboard_live[index] {
            repository.deactivate_dashboard(DashboardId::new(*dashboard_id)).await;
        }
    }

    let role_plan: [(Option<i64>, Option<RoleName>); 6] = [
        (None, Some(RoleName::RootAdmin)),
        (Some(1), Some(RoleName::TenantAdmin)),
        (Some(1), Some(RoleName::User)),
        (Some(2), Some(RoleName::User)),
        (Some(1), None),
        (Some(2), Some(RoleName::TenantAdmin)),
    ];
    for (index, user_id) in WORLD_USERS.iter().enumerate() {
        let (account_id, role) = role_plan[index];
        let mut record = user(*user_id, account_id);
        if !flags.user_live[index] {
            record = UserRecord::new(
                UserId::new(*user_id),
                account_id.map(AccountId::new),
                format!("user{user_id}@example.com"),
                false,
                None,
            )
            .unwrap_or_else(|_| unreachable!());
        }
        repository.insert_user(record).await;
        if let Some(role) = role {
            repository.assign_role(UserId::new(*user_id), role).await;
        }
    }

    for (user_index, dashboard_index) in &flags.grants {
        repository
            .grant_dashboard(
                UserId::new(WORLD_USERS[*user_index]),
                DashboardId::new(WORLD_DASHBOARDS[*dashboard_index]),
            )
            .await;
    }

    repository
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn listing_agrees_with_single_check(flags in world_strategy()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|error| TestCaseError::fail(error.to_string()))?;

        runtime.block_on(async {
            let repository = build_world(&flags).await;
            let service = AccessService::new(repository.clone(), repository.clone());

            for user_id in WORLD_USERS {
                let listed = accessible_ids(&service, UserId::new(user_id)).await;
                for dashboard_id in WORLD_DASHBOARDS {
                    let checked = service
                        .can_access_dashboard(UserId::new(user_id), DashboardId::new(dashboard_id))
                        .await;
                    prop_assert_eq!(
                        listed.contains(&DashboardId::new(dashboard_id)),
                        checked,
                        "user {} dashboard {} listing/check disagreement",
                        user_id,
                        dashboard_id
                    );
                }
            }

            Ok(())
        })?;
    }
}
