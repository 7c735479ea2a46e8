//! Shared fixtures for descriptor loading tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub const PACKAGE: &str = "github.com/acme/users";

/// A temporary search root laid out as `<root>/src/<package>/`.
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temporary directory");
        fs::create_dir_all(root.path().join("src").join(PACKAGE))
            .expect("Failed to create service directory");
        Self { root }
    }

    /// Search path value pointing at this workspace.
    pub fn search_path(&self) -> String {
        self.root.path().to_string_lossy().into_owned()
    }

    /// Write `<service root>/<file_name>.yaml`.
    pub fn write_descriptor(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self
            .root
            .path()
            .join("src")
            .join(PACKAGE)
            .join(format!("{}.yaml", file_name));
        fs::write(&path, content).expect("Failed to write descriptor");
        path
    }
}

pub const SERVICE_YAML: &str = r#"
urlmapping:
  - GET /users/:id GetUser
  - POST /users CreateUser
  - DELETE /users/:id DeleteUser

config:
  grpc_service_name: Users
  grpc_service_address: 127.0.0.1:50051
  thrift_service_name: UsersThrift
  thrift_service_address: 127.0.0.1:50052
  http_port: 8080
  filter_proto_json: true
  filter_proto_json_emit_zerovalues: false
  custom_setting: kept

grpc-fieldmapping:
  Name: [first, last]
  Address:
    - street
    - city
  Id:

thrift-fieldmapping:
  Name: [full_name]
"#;
