// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;

use crate::store::{HourStore, StorageConfig, TrainingStore, open_repositories};
use crate::tests::test_factory;

#[test]
fn test_storage_config_is_tagged_by_backend() {
    let sqlite: StorageConfig =
        serde_json::from_str(r#"{"backend":"sqlite","path":"/var/lib/gymslot.db"}"#).unwrap();
    let memory: StorageConfig = serde_json::from_str(r#"{"backend":"memory"}"#).unwrap();
    let document: StorageConfig =
        serde_json::from_str(r#"{"backend":"document","path":null}"#).unwrap();

    assert_eq!(
        sqlite,
        StorageConfig::Sqlite {
            path: PathBuf::from("/var/lib/gymslot.db")
        }
    );
    assert_eq!(memory, StorageConfig::Memory);
    assert_eq!(document, StorageConfig::Document { path: None });
}

#[test]
fn test_unknown_backend_is_rejected() {
    let result = serde_json::from_str::<StorageConfig>(r#"{"backend":"mysql"}"#);

    assert!(result.is_err());
}

#[test]
fn test_open_repositories_selects_backend() {
    let (hours, trainings) = open_repositories(&StorageConfig::Memory, test_factory()).unwrap();
    assert!(matches!(hours, HourStore::Memory(_)));
    assert!(matches!(trainings, TrainingStore::Memory(_)));

    let (hours, trainings) =
        open_repositories(&StorageConfig::Document { path: None }, test_factory()).unwrap();
    assert!(matches!(hours, HourStore::Document(_)));
    assert!(matches!(trainings, TrainingStore::Document(_)));
}

#[test]
fn test_sqlite_file_survives_reopen() {
    use crate::repository::HourRepository;
    use crate::tests::tomorrow_at;
    use gymslot_domain::Availability;

    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::Sqlite {
        path: dir.path().join("reopen.db"),
    };

    {
        let (hours, _) = open_repositories(&config, test_factory()).unwrap();
        hours
            .update_hour(tomorrow_at(14), |mut hour| {
                hour.make_available()?;
                Ok::<_, crate::PersistenceError>(hour)
            })
            .unwrap();
    }

    let (hours, _) = open_repositories(&config, test_factory()).unwrap();
    let hour = hours.get_or_create_hour(tomorrow_at(14)).unwrap();
    assert_eq!(hour.availability(), Availability::Available);
}
