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
    use sea_orm::DatabaseConnection;

    use crate::helpers::app::make_test_app;

    async fn seed_member(db: &DatabaseConnection) -> Member {
        Member::create(db, "Thandi", "Nkosi", "thandi@example.com", None)
            .await
            .expect("create member")
    }

    fn post_json(uri: &str, body: Value) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(AxumBody::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_check_in_creates_open_record() {
        let (app, db) = make_test_app().await;
        let member = seed_member(&db).await;

        let uri = format!("/api/attendance/checkin/{}", member.id);
        let body = serde_json::json!({ "location": "Main Gym", "notes": "first visit" });

        let resp = app.oneshot(post_json(&uri, body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let json = body_json(resp).await;
        assert_eq!(json["isSuccess"], true);
        assert_eq!(json["message"], "Checked in");
        assert_eq!(json["data"]["memberId"], member.id);
        assert_eq!(json["data"]["location"], "Main Gym");
        assert_eq!(json["data"]["notes"], "first visit");
        assert_eq!(json["data"]["checkOutTime"], Value::Null);
        assert_eq!(json["data"]["durationMinutes"], Value::Null);
        assert!(json["data"]["checkInTime"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_check_in_unknown_member_not_found() {
        let (app, _db) = make_test_app().await;

        let resp = app
            .oneshot(post_json(
                "/api/attendance/checkin/4040",
                serde_json::json!({ "location": "Pool" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let json = body_json(resp).await;
        assert_eq!(json["isSuccess"], false);
        assert_eq!(json["message"], "Member not found");
    }

    #[tokio::test]
    async fn test_duplicate_check_in_bad_request() {
        let (app, db) = make_test_app().await;
        let member = seed_member(&db).await;
        let uri = format!("/api/attendance/checkin/{}", member.id);

        let first = app
            .clone()
            .oneshot(post_json(&uri, serde_json::json!({ "location": "Main Gym" })))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(post_json(&uri, serde_json::json!({ "location": "Cardio Area" })))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);

        let json = body_json(second).await;
        assert_eq!(json["isSuccess"], false);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("already checked in")
        );
    }

    #[tokio::test]
    async fn test_check_out_closes_record() {
        let (app, db) = make_test_app().await;
        let member = seed_member(&db).await;

        let checkin_uri = format!("/api/attendance/checkin/{}", member.id);
        let resp = app
            .clone()
            .oneshot(post_json(
                &checkin_uri,
                serde_json::json!({ "location": "Weight Room", "notes": "leg day" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let checkout_uri = format!("/api/attendance/checkout/{}", member.id);
        let resp = app
            .oneshot(post_json(
                &checkout_uri,
                serde_json::json!({ "notes": "done" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["isSuccess"], true);
        assert_eq!(json["message"], "Checked out");
        assert!(json["data"]["checkOutTime"].as_str().is_some());
        assert!(json["data"]["durationMinutes"].as_i64().is_some());
        assert_eq!(json["data"]["notes"], "leg day\ndone");
    }

    #[tokio::test]
    async fn test_check_out_without_open_visit_bad_request() {
        let (app, db) = make_test_app().await;
        let member = seed_member(&db).await;

        let uri = format!("/api/attendance/checkout/{}", member.id);
        let resp = app
            .oneshot(post_json(&uri, serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        assert_eq!(json["isSuccess"], false);
        assert!(json["message"].as_str().unwrap().contains("not checked in"));
    }

    #[tokio::test]
    async fn test_repeat_check_out_bad_request() {
        let (app, db) = make_test_app().await;
        let member = seed_member(&db).await;

        let checkin_uri = format!("/api/attendance/checkin/{}", member.id);
        let checkout_uri = format!("/api/attendance/checkout/{}", member.id);

        app.clone()
            .oneshot(post_json(&checkin_uri, serde_json::json!({ "location": "Pool" })))
            .await
            .unwrap();

        let first = app
            .clone()
            .oneshot(post_json(&checkout_uri, serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        // A second checkout must fail, never silently close twice.
        let second = app
            .oneshot(post_json(&checkout_uri, serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);

        let json = body_json(second).await;
        assert_eq!(json["isSuccess"], false);
        assert!(json["message"].as_str().unwrap().contains("not checked in"));
    }

    #[tokio::test]
    async fn test_check_in_missing_location_is_422() {
        let (app, db) = make_test_app().await;
        let member = seed_member(&db).await;

        let uri = format!("/api/attendance/checkin/{}", member.id);
        let resp = app
            .oneshot(post_json(&uri, serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_check_in_unknown_location_is_422() {
        let (app, db) = make_test_app().await;
        let member = seed_member(&db).await;

        let uri = format!("/api/attendance/checkin/{}", member.id);
        let resp = app
            .oneshot(post_json(&uri, serde_json::json!({ "location": "Sauna" })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
