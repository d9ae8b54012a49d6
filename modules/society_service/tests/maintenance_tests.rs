//! Maintenance request flow tests

mod common;

use common::*;
use society_service::contract::*;
use uuid::Uuid;

#[tokio::test]
async fn test_tenant_files_request_in_their_society() {
    print_test_header(
        "test_tenant_files_request_in_their_society",
        "A filed request is pending and bound to the tenant's society",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let tenant = env.tenant_in(society.id, "ravi@example.com").await;

    let request = env
        .service
        .create_maintenance_request(&tenant, new_request("Leaking tap"))
        .await
        .unwrap();

    assert_eq!(request.society_id, society.id);
    assert_eq!(request.tenant_id, tenant.profile_id);
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.assigned_worker_id, None);
    assert_eq!(request.resolved_at, None);
    assert_eq!(
        env.events.names(),
        vec!["society_provisioned", "maintenance_requested"]
    );
    println!("✅ Request filed as pending");
}

#[tokio::test]
async fn test_create_request_validation() {
    print_test_header(
        "test_create_request_validation",
        "Blank fields, admins, unlinked tenants and foreign units are rejected",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let tenant = env.tenant_in(society.id, "ravi@example.com").await;

    let blank = NewMaintenanceRequest {
        title: String::new(),
        description: " ".to_string(),
        ..new_request("x")
    };
    assert_eq!(
        env.service
            .create_maintenance_request(&tenant, blank)
            .await
            .unwrap_err(),
        SocietyError::MissingFields {
            fields: vec!["title".to_string(), "description".to_string()]
        }
    );

    let err = env
        .service
        .create_maintenance_request(&admin, new_request("Leaking tap"))
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::Forbidden { .. }));

    let drifter = env.tenant("drifter@example.com", "Dev", "Shah").await;
    let err = env
        .service
        .create_maintenance_request(&drifter, new_request("Leaking tap"))
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::Forbidden { .. }));

    let foreign_unit = NewMaintenanceRequest {
        property_id: Some(Uuid::new_v4()),
        ..new_request("Leaking tap")
    };
    let err = env
        .service
        .create_maintenance_request(&tenant, foreign_unit)
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::Validation { .. }));

    assert!(env.store.maintenance_requests().is_empty());
    println!("✅ Invalid requests rejected");
}

#[tokio::test]
async fn test_create_request_store_failure_is_reported() {
    print_test_header(
        "test_create_request_store_failure_is_reported",
        "A rejected insert surfaces as a storage error",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let tenant = env.tenant_in(society.id, "ravi@example.com").await;
    env.store.fail_maintenance_create("database is locked");

    let err = env
        .service
        .create_maintenance_request(&tenant, new_request("Leaking tap"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SocietyError::Storage {
            operation: "create maintenance request".to_string(),
            message: "database is locked".to_string(),
        }
    );
    println!("✅ Storage failure surfaced");
}

#[tokio::test]
async fn test_listing_reports_unknown_user_for_missing_profile() {
    print_test_header(
        "test_listing_reports_unknown_user_for_missing_profile",
        "Rows whose tenant profile is gone read as Unknown User",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let ravi = env.tenant_in(society.id, "ravi@example.com").await;
    let priya = env.tenant("priya@example.com", "Priya", "Nair").await;
    env.service.join_society(&priya, society.id).await.unwrap();

    env.service
        .create_maintenance_request(&ravi, new_request("Leaking tap"))
        .await
        .unwrap();
    env.service
        .create_maintenance_request(&priya, new_request("Broken switch"))
        .await
        .unwrap();
    env.service
        .create_maintenance_request(&ravi, new_request("Squeaky door"))
        .await
        .unwrap();

    env.store.remove_profile(ravi.profile_id);

    let views = env
        .service
        .list_maintenance_requests(&admin, Some(society.id), MaintenanceFilter::default())
        .await
        .unwrap();

    let rows: Vec<(&str, &str)> = views
        .iter()
        .map(|v| (v.request.title.as_str(), v.tenant_name.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Leaking tap", UNKNOWN_USER),
            ("Broken switch", "Priya Nair"),
            ("Squeaky door", UNKNOWN_USER),
        ]
    );
    println!("✅ Missing profiles reported as Unknown User");
}

#[tokio::test]
async fn test_listing_scopes_and_filters() {
    print_test_header(
        "test_listing_scopes_and_filters",
        "Tenants see their own requests; the status filter applies to both roles",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let ravi = env.tenant_in(society.id, "ravi@example.com").await;
    let priya = env.tenant_in(society.id, "priya@example.com").await;

    let first = env
        .service
        .create_maintenance_request(&ravi, new_request("Leaking tap"))
        .await
        .unwrap();
    env.service
        .create_maintenance_request(&priya, new_request("Broken switch"))
        .await
        .unwrap();
    env.service
        .update_maintenance_request(
            &ravi,
            first.id,
            MaintenanceRequestPatch {
                status: Some(RequestStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let own = env
        .service
        .list_maintenance_requests(&ravi, None, MaintenanceFilter::default())
        .await
        .unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].tenant_name, "Ravi Kumar");

    let pending = env
        .service
        .list_maintenance_requests(
            &admin,
            None,
            MaintenanceFilter {
                status: Some(RequestStatus::Pending),
            },
        )
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].request.title, "Broken switch");

    // Tenants never see another tenant's request
    let err = env
        .service
        .get_maintenance_request(&priya, first.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::NotFound { .. }));
    println!("✅ Listings scoped and filtered");
}

#[tokio::test]
async fn test_admin_assignment_moves_request_in_progress() {
    print_test_header(
        "test_admin_assignment_moves_request_in_progress",
        "Assigning a society worker starts work on a pending request",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let tenant = env.tenant_in(society.id, "ravi@example.com").await;
    let worker = env
        .service
        .add_worker(&admin, society.id, new_worker("Raju", WorkerCategory::Plumber))
        .await
        .unwrap();

    let request = env
        .service
        .create_maintenance_request(&tenant, new_request("Leaking tap"))
        .await
        .unwrap();

    let updated = env
        .service
        .update_maintenance_request(
            &admin,
            request.id,
            MaintenanceRequestPatch {
                assigned_worker_id: Some(worker.id),
                priority: Some(Priority::High),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.assigned_worker_id, Some(worker.id));
    assert_eq!(updated.status, RequestStatus::InProgress);
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.title, request.title);

    let resolved = env
        .service
        .update_maintenance_request(
            &admin,
            request.id,
            MaintenanceRequestPatch {
                status: Some(RequestStatus::Resolved),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(resolved.status, RequestStatus::Resolved);
    assert!(resolved.resolved_at.is_some());

    let last = env.events.events().pop().unwrap();
    match last {
        society_service::domain::DomainEvent::MaintenanceUpdated(e) => {
            assert_eq!(e.actor_id, admin.profile_id);
            assert_eq!(e.status(), Some(RequestStatus::Resolved));
        }
        other => panic!("Expected MaintenanceUpdated event, got {:?}", other),
    }
    println!("✅ Assignment and resolution applied");
}

#[tokio::test]
async fn test_update_rules_by_role() {
    print_test_header(
        "test_update_rules_by_role",
        "Tenants edit text or cancel; admins triage; neither crosses over",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let tenant = env.tenant_in(society.id, "ravi@example.com").await;
    let worker = env
        .service
        .add_worker(&admin, society.id, new_worker("Raju", WorkerCategory::Plumber))
        .await
        .unwrap();
    let request = env
        .service
        .create_maintenance_request(&tenant, new_request("Leaking tap"))
        .await
        .unwrap();

    let tenant_assigns = MaintenanceRequestPatch {
        assigned_worker_id: Some(worker.id),
        ..Default::default()
    };
    assert!(matches!(
        env.service
            .update_maintenance_request(&tenant, request.id, tenant_assigns)
            .await,
        Err(SocietyError::Forbidden { .. })
    ));

    let tenant_resolves = MaintenanceRequestPatch {
        status: Some(RequestStatus::Resolved),
        ..Default::default()
    };
    assert!(matches!(
        env.service
            .update_maintenance_request(&tenant, request.id, tenant_resolves)
            .await,
        Err(SocietyError::Forbidden { .. })
    ));

    let admin_rewrites = MaintenanceRequestPatch {
        title: Some("Different issue".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        env.service
            .update_maintenance_request(&admin, request.id, admin_rewrites)
            .await,
        Err(SocietyError::Forbidden { .. })
    ));

    assert!(matches!(
        env.service
            .update_maintenance_request(&admin, request.id, MaintenanceRequestPatch::default())
            .await,
        Err(SocietyError::Validation { .. })
    ));

    let edited = env
        .service
        .update_maintenance_request(
            &tenant,
            request.id,
            MaintenanceRequestPatch {
                title: Some("Leaking kitchen tap".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.title, "Leaking kitchen tap");
    assert_eq!(edited.status, RequestStatus::Pending);
    println!("✅ Role rules enforced");
}

#[tokio::test]
async fn test_terminal_requests_reject_updates() {
    print_test_header(
        "test_terminal_requests_reject_updates",
        "Cancelled requests accept no further changes",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let tenant = env.tenant_in(society.id, "ravi@example.com").await;
    let request = env
        .service
        .create_maintenance_request(&tenant, new_request("Leaking tap"))
        .await
        .unwrap();

    env.service
        .update_maintenance_request(
            &tenant,
            request.id,
            MaintenanceRequestPatch {
                status: Some(RequestStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let updates_before = MemoryStore::calls(&env.store.maintenance_update_calls);

    let err = env
        .service
        .update_maintenance_request(
            &admin,
            request.id,
            MaintenanceRequestPatch {
                priority: Some(Priority::Urgent),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::Conflict { .. }));
    assert_eq!(
        MemoryStore::calls(&env.store.maintenance_update_calls),
        updates_before
    );
    println!("✅ Terminal request left untouched");
}

#[tokio::test]
async fn test_worker_from_other_society_cannot_be_assigned() {
    print_test_header(
        "test_worker_from_other_society_cannot_be_assigned",
        "Assigned workers must serve the request's society",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let other_admin = env.admin("other@example.com").await;
    let other_society = env.society(&other_admin).await;
    let outsider = env
        .service
        .add_worker(
            &other_admin,
            other_society.id,
            new_worker("Kiran", WorkerCategory::Electrician),
        )
        .await
        .unwrap();

    let tenant = env.tenant_in(society.id, "ravi@example.com").await;
    let request = env
        .service
        .create_maintenance_request(&tenant, new_request("Broken switch"))
        .await
        .unwrap();

    let err = env
        .service
        .update_maintenance_request(
            &admin,
            request.id,
            MaintenanceRequestPatch {
                assigned_worker_id: Some(outsider.id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::Validation { .. }));

    // The other admin cannot see the request at all
    let err = env
        .service
        .get_maintenance_request(&other_admin, request.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::Forbidden { .. }));
    println!("✅ Cross-society assignment rejected");
}

#[tokio::test]
async fn test_native_client_drives_the_same_service() {
    print_test_header(
        "test_native_client_drives_the_same_service",
        "In-process callers see the rules and data of the REST surface",
    );

    let env = TestEnv::new();
    let client = env.module.client().unwrap();
    let admin = env.admin("admin@greenmeadows.in").await;

    let mut form = new_society("Green Meadows");
    form.workers = vec![new_worker("Raju", WorkerCategory::Plumber)];
    let provisioning = client.provision_society(&admin, form).await.unwrap();
    let society = client
        .get_society(&admin, provisioning.society.id)
        .await
        .unwrap();
    assert_eq!(society.name, "Green Meadows");

    let tenant = env.tenant_in(society.id, "ravi@example.com").await;
    let request = client
        .create_maintenance_request(&tenant, new_request("Leaking tap"))
        .await
        .unwrap();
    let updated = client
        .update_maintenance_request(
            &admin,
            request.id,
            MaintenanceRequestPatch {
                assigned_worker_id: Some(provisioning.workers[0].id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, RequestStatus::InProgress);

    let views = client
        .list_maintenance_requests(&tenant, None, MaintenanceFilter::default())
        .await
        .unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].tenant_name, "Ravi Kumar");

    client
        .publish_notice(
            &admin,
            None,
            NewNotice {
                title: "Lift service".to_string(),
                content: "Lift B is down on Sunday".to_string(),
                expires_at: None,
            },
        )
        .await
        .unwrap();
    assert!(matches!(
        client
            .publish_notice(
                &tenant,
                None,
                NewNotice {
                    title: "Party".to_string(),
                    content: "Terrace at 8".to_string(),
                    expires_at: None,
                },
            )
            .await,
        Err(SocietyError::Forbidden { .. })
    ));
    assert_eq!(client.list_notices(&tenant, None).await.unwrap().len(), 1);
    println!("✅ Native client works");
}
