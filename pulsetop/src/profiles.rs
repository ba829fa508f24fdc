//! Connection profiles: load/save a simple JSON mapping of profile name -> { url }.
//! Stored next to the sync record: $XDG_CONFIG_HOME/pulsetop/profiles.json.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::store::config_dir;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileEntry {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    match fs::read_to_string(profiles_path()) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> std::io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).unwrap_or_default();
    fs::write(path, data)
}

pub enum ResolveProfile {
    /// Use the provided runtime URL (caller may persist it afterwards).
    Direct(String),
    /// Loaded from an existing profile entry.
    Loaded(String),
    /// Should prompt the user to select among profile names.
    PromptSelect(Vec<String>),
    /// Should prompt the user to create a new profile with this name.
    PromptCreate(String),
    /// Nothing to resolve (no URL, no profiles).
    None,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveProfile {
        // Only a profile name given -> try to load it
        if self.url.is_none() {
            if let Some(name) = self.profile_name {
                return match pf.profiles.get(&name) {
                    Some(entry) => ResolveProfile::Loaded(entry.url.clone()),
                    None => ResolveProfile::PromptCreate(name),
                };
            }
        }
        // URL given -> direct (maybe saved by the caller)
        if let Some(u) = self.url {
            return ResolveProfile::Direct(u);
        }
        // Nothing given -> offer a selection if any profiles exist
        if pf.profiles.is_empty() {
            ResolveProfile::None
        } else {
            ResolveProfile::PromptSelect(pf.profiles.keys().cloned().collect())
        }
    }
}
