#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use db::models::member::Model as Member;

    use crate::helpers::app::make_test_app;

    fn json_request(method: &str, uri: &str, body: Value) -> Request<AxumBody> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(AxumBody::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<AxumBody> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(AxumBody::empty())
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_member_ok() {
        let (app, db) = make_test_app().await;

        let body = serde_json::json!({
            "firstName": "Thandi",
            "lastName": "Nkosi",
            "email": "thandi@example.com",
            "phone": "+27 82 111 2222"
        });
        let resp = app
            .oneshot(json_request("POST", "/api/members", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let json = body_json(resp).await;
        assert_eq!(json["isSuccess"], true);
        assert_eq!(json["message"], "Member created");
        assert_eq!(json["data"]["firstName"], "Thandi");
        assert_eq!(json["data"]["email"], "thandi@example.com");

        let id = json["data"]["id"].as_i64().expect("id present");
        let stored = Member::get_by_id(&db, id).await.unwrap().expect("persisted");
        assert_eq!(stored.phone.as_deref(), Some("+27 82 111 2222"));
    }

    #[tokio::test]
    async fn test_create_member_duplicate_email_conflict() {
        let (app, db) = make_test_app().await;
        Member::create(&db, "Sipho", "Dlamini", "sipho@example.com", None)
            .await
            .unwrap();

        let body = serde_json::json!({
            "firstName": "Other",
            "lastName": "Person",
            "email": "sipho@example.com"
        });
        let resp = app
            .oneshot(json_request("POST", "/api/members", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let json = body_json(resp).await;
        assert_eq!(json["isSuccess"], false);
        assert!(json["message"].as_str().unwrap().contains("already in use"));
    }

    #[tokio::test]
    async fn test_create_member_invalid_email_unprocessable() {
        let (app, _db) = make_test_app().await;

        let body = serde_json::json!({
            "firstName": "Bad",
            "lastName": "Email",
            "email": "not-an-email"
        });
        let resp = app
            .oneshot(json_request("POST", "/api/members", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(resp).await;
        assert_eq!(json["isSuccess"], false);
    }

    #[tokio::test]
    async fn test_get_member_and_missing() {
        let (app, db) = make_test_app().await;
        let member = Member::create(&db, "Lerato", "Molefe", "lerato@example.com", None)
            .await
            .unwrap();

        let resp = app
            .clone()
            .oneshot(get(&format!("/api/members/{}", member.id)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["lastName"], "Molefe");

        let resp = app.oneshot(get("/api/members/999999")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_members_search_and_pagination() {
        let (app, db) = make_test_app().await;
        Member::create(&db, "Anele", "Zulu", "anele@example.com", None)
            .await
            .unwrap();
        Member::create(&db, "Bongani", "Zungu", "bongani@example.com", None)
            .await
            .unwrap();
        Member::create(&db, "Carla", "Meyer", "carla@example.com", None)
            .await
            .unwrap();

        let resp = app
            .clone()
            .oneshot(get("/api/members?q=Zu&sort=first_name"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let members = json["data"]["members"].as_array().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0]["firstName"], "Anele");
        assert_eq!(json["data"]["total"], 2);

        let resp = app
            .oneshot(get("/api/members?page=2&per_page=2&sort=first_name"))
            .await
            .unwrap();
        let json = body_json(resp).await;
        let members = json["data"]["members"].as_array().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0]["firstName"], "Carla");
        assert_eq!(json["data"]["total"], 3);
    }

    #[tokio::test]
    async fn test_edit_member() {
        let (app, db) = make_test_app().await;
        let member = Member::create(&db, "Naledi", "Khumalo", "naledi@example.com", None)
            .await
            .unwrap();
        Member::create(&db, "Taken", "Email", "taken@example.com", None)
            .await
            .unwrap();

        // Taking another member's email is rejected.
        let body = serde_json::json!({
            "firstName": "Naledi",
            "lastName": "Khumalo",
            "email": "taken@example.com"
        });
        let resp = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/members/{}", member.id),
                body,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        // Keeping your own email while changing details is fine.
        let body = serde_json::json!({
            "firstName": "Naledi",
            "lastName": "Khumalo-Smith",
            "email": "naledi@example.com",
            "phone": "+27 83 555 0000"
        });
        let resp = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/members/{}", member.id),
                body.clone(),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["lastName"], "Khumalo-Smith");
        assert_eq!(json["data"]["phone"], "+27 83 555 0000");

        let resp = app
            .oneshot(json_request("PUT", "/api/members/999999", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_member() {
        let (app, db) = make_test_app().await;
        let member = Member::create(&db, "Gone", "Soon", "gone@example.com", None)
            .await
            .unwrap();

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/members/{}", member.id))
                    .body(AxumBody::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(Member::get_by_id(&db, member.id).await.unwrap().is_none());

        let resp = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/members/{}", member.id))
                    .body(AxumBody::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
