use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;

use service::auth::service::{login_input, AdminAuthService, AuthConfig};
use service::services::club_service::CLUBS;

fn bench_login(c: &mut Criterion) {
    let svc = AdminAuthService::new(AuthConfig {
        username: Some("admin".into()),
        password: Some("Benchmark1".into()),
        session_secret: "secret".into(),
        session_ttl_hours: 12,
    });
    let input = login_input("admin", "Benchmark1");

    c.bench_function("admin_login_verify", |b| {
        b.iter(|| {
            let session = svc.login(&input).unwrap();
            svc.verify(&session.token).unwrap();
        });
    });
}

fn bench_reshape(c: &mut Criterion) {
    let data: Vec<_> = (0..500).map(|i| json!({"uid": format!("c{i}"), "displayName": "Club"})).collect();
    let upstream = json!({"data": data, "count": 500});

    c.bench_function("club_envelope_reshape", |b| {
        b.iter(|| CLUBS.reshape(&upstream));
    });
}

criterion_group!(benches, bench_login, bench_reshape);
criterion_main!(benches);
