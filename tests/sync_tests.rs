use std::path::Path;

use site_asset_store::{
    create_in_memory_app, AssetAdminService, AssetBucket, ObjectPath,
};

async fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.unwrap();
    }
    tokio::fs::write(path, contents).await.unwrap();
}

#[tokio::test]
async fn sync_uploads_nested_directories() {
    let services = create_in_memory_app().await.unwrap();
    services.admin_service.provision_buckets().await;

    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("cover.webp"), b"cover").await;
    write_file(&dir.path().join("students/a.webp"), b"a").await;
    write_file(&dir.path().join("students/b.webp"), b"b").await;

    let report = services
        .admin_service
        .sync_directory(dir.path(), AssetBucket::Gallery, None)
        .await
        .unwrap();

    assert_eq!(report.uploaded, 3);
    assert_eq!(report.failed, 0);

    let listed = services
        .admin_service
        .list_files(AssetBucket::Gallery, None)
        .await
        .unwrap();
    let mut paths: Vec<&str> = listed.iter().map(|o| o.path.as_str()).collect();
    paths.sort();
    assert_eq!(paths, ["cover.webp", "students/a.webp", "students/b.webp"]);
}

#[tokio::test]
async fn sync_applies_remote_prefix() {
    let services = create_in_memory_app().await.unwrap();
    services.admin_service.provision_buckets().await;

    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("jane.webp"), b"jane").await;

    let prefix = ObjectPath::new("staff".to_string()).unwrap();
    let report = services
        .admin_service
        .sync_directory(dir.path(), AssetBucket::Team, Some(&prefix))
        .await
        .unwrap();
    assert_eq!(report.uploaded, 1);

    let listed = services
        .admin_service
        .list_files(AssetBucket::Team, Some("staff/"))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].path, "staff/jane.webp");
}

#[tokio::test]
async fn sync_counts_rejected_files_without_aborting() {
    let services = create_in_memory_app().await.unwrap();
    services.admin_service.provision_buckets().await;

    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("ok.webp"), b"ok").await;
    // Fails the image/* allowlist but must not stop the walk
    write_file(&dir.path().join("readme.txt"), b"nope").await;

    let report = services
        .admin_service
        .sync_directory(dir.path(), AssetBucket::GeneralImages, None)
        .await
        .unwrap();

    assert_eq!(report.uploaded, 1);
    assert_eq!(report.failed, 1);

    let listed = services
        .admin_service
        .list_files(AssetBucket::GeneralImages, None)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].path, "ok.webp");
}

#[tokio::test]
async fn sync_missing_directory_is_an_error() {
    let services = create_in_memory_app().await.unwrap();
    services.admin_service.provision_buckets().await;

    let result = services
        .admin_service
        .sync_directory(Path::new("/nonexistent/assets"), AssetBucket::Gallery, None)
        .await;

    assert!(result.is_err());
}
