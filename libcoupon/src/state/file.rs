/*
 * Copyright 2021 Cargill Incorporated
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * -----------------------------------------------------------------------------
 */

//! State stored in a single JSON file.
//!
//! The file holds a JSON object mapping each key to its hex-encoded value. Every commit rewrites
//! the whole file through a temporary sibling that is then renamed over the original, so a
//! reader never observes a partially written file.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::error::{StateReadError, StateWriteError};
use super::{Read, StateChange, Write};

#[derive(Debug, Clone)]
pub struct FileState {
    path: PathBuf,
    // Serializes read-modify-write cycles between clones within this process.
    lock: Arc<Mutex<()>>,
}

impl FileState {
    /// Creates a state backed by the file at `path`. The file is not touched until the first
    /// commit; a missing file reads as empty state.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileState {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, Vec<u8>>, StateReadError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(StateReadError::StorageError(Box::new(err))),
        };

        let encoded: BTreeMap<String, String> =
            serde_json::from_str(&contents).map_err(|err| {
                StateReadError::InvalidEntry(format!(
                    "{} is not a ledger file: {}",
                    self.path.display(),
                    err
                ))
            })?;

        encoded
            .into_iter()
            .map(|(key, value)| {
                let bytes = hex::decode(&value).map_err(|err| {
                    StateReadError::InvalidEntry(format!("Value of {} is not hex: {}", key, err))
                })?;
                Ok((key, bytes))
            })
            .collect()
    }

    fn store(&self, state: &BTreeMap<String, Vec<u8>>) -> Result<(), StateWriteError> {
        let encoded = state
            .iter()
            .map(|(key, value)| (key.as_str(), hex::encode(value)))
            .collect::<BTreeMap<&str, String>>();
        let contents = serde_json::to_string_pretty(&encoded)
            .map_err(|err| StateWriteError::StorageError(Box::new(err)))?;

        let mut tmp_path = OsString::from(self.path.as_os_str());
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        fs::write(&tmp_path, contents)
            .and_then(|_| fs::rename(&tmp_path, &self.path))
            .map_err(|err| StateWriteError::StorageError(Box::new(err)))
    }
}

impl Write for FileState {
    fn commit(&self, state_changes: &[StateChange]) -> Result<(), StateWriteError> {
        let _guard = self.lock.lock().expect("Couldn't lock ledger file mutex!");
        let mut state = self.load()?;
        for change in state_changes {
            state.insert(change.key.clone(), change.value.clone());
        }
        self.store(&state)?;
        debug!(
            "Committed {} change(s) to {}",
            state_changes.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl Read for FileState {
    fn get(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StateReadError> {
        let _guard = self.lock.lock().expect("Couldn't lock ledger file mutex!");
        let mut state = self.load()?;
        Ok(keys
            .iter()
            .filter_map(|k| state.remove(k).map(|v| (k.clone(), v)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempdir::TempDir;

    fn change(key: &str, value: &[u8]) -> StateChange {
        StateChange {
            key: key.into(),
            value: value.to_vec(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new("test_missing_file_is_empty").unwrap();
        let state = FileState::new(temp_dir.path().join("ledger.json"));

        assert!(state.get(&["a".into()]).unwrap().is_empty());
        assert!(!state.path().exists());
    }

    #[test]
    fn test_commit_persists_across_instances() {
        let temp_dir = TempDir::new("test_commit_persists").unwrap();
        let path = temp_dir.path().join("ledger.json");

        FileState::new(&path)
            .commit(&[change("a", b"\x00\x01"), change("b", b"{}")])
            .unwrap();
        FileState::new(&path)
            .commit(&[change("b", b"value_b")])
            .unwrap();

        let found = FileState::new(&path)
            .get(&["a".into(), "b".into(), "c".into()])
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found.get("a"), Some(&vec![0u8, 1u8]));
        assert_eq!(found.get("b"), Some(&b"value_b".to_vec()));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"a\": \"0001\""));
        assert!(!temp_dir.path().join("ledger.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file() {
        let temp_dir = TempDir::new("test_corrupt_file").unwrap();
        let path = temp_dir.path().join("ledger.json");
        fs::write(&path, "{\"a\": \"zz\"}").unwrap();

        let state = FileState::new(&path);
        match state.get(&["a".into()]) {
            Err(StateReadError::InvalidEntry(_)) => (),
            res => panic!("Expected InvalidEntry, got {:?}", res),
        }
        match state.commit(&[change("b", b"1")]) {
            Err(StateWriteError::InvalidEntry(_)) => (),
            res => panic!("Expected InvalidEntry, got {:?}", res),
        }
    }
}
