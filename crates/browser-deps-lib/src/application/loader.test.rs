use super::*;

#[test]
fn test_missing_env_files_are_skipped() {
    let result = load_env_files(&["/definitely/not/here/.env.local"]);
    assert!(result.is_ok());
}

#[test]
fn test_env_file_list_order() {
    assert_eq!(ENV_FILES, [".env.local", ".env"]);
}
