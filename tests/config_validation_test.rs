use showroom::config::{AppConfig, MediaBackendKind, MediaSection, S3MediaSection};
use showroom::media::MediaConfig;

#[test]
fn default_media_backend_is_local() {
    let config = AppConfig::default();

    match config.media_runtime().expect("defaults should be valid") {
        MediaConfig::Local { root_path } => assert_eq!(root_path, "./media"),
        other => panic!("Unexpected media config: {other:?}"),
    }
}

#[test]
fn s3_backend_requires_settings() {
    let config = AppConfig {
        media: MediaSection {
            backend: MediaBackendKind::S3,
            local: None,
            s3: None,
        },
        ..Default::default()
    };

    assert!(config.media_runtime().is_err());
}

#[test]
fn s3_backend_rejects_blank_bucket() {
    let config = AppConfig {
        media: MediaSection {
            backend: MediaBackendKind::S3,
            local: None,
            s3: Some(S3MediaSection {
                bucket: "  ".into(),
                region: "auto".into(),
                endpoint: None,
            }),
        },
        ..Default::default()
    };

    assert!(config.media_runtime().is_err());
}

#[test]
fn s3_backend_carries_custom_endpoint() {
    let config = AppConfig {
        media: MediaSection {
            backend: MediaBackendKind::S3,
            local: None,
            s3: Some(S3MediaSection {
                bucket: "cars-website".into(),
                region: "auto".into(),
                endpoint: Some("https://account.r2.cloudflarestorage.com".into()),
            }),
        },
        ..Default::default()
    };

    match config.media_runtime().expect("S3 configuration should be valid") {
        MediaConfig::S3 {
            bucket, endpoint, ..
        } => {
            assert_eq!(bucket, "cars-website");
            assert!(endpoint.is_some());
        }
        other => panic!("Unexpected media config: {other:?}"),
    }
}
