//! Address Book
//!
//! Contacts with typed phone numbers, searchable by name, address or phone.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Kind of phone line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneType {
    Home,
    Office,
    Studio,
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PhoneType::Home => "home",
            PhoneType::Office => "office",
            PhoneType::Studio => "studio",
        })
    }
}

impl FromStr for PhoneType {
    type Err = AddressBookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(PhoneType::Home),
            "office" => Ok(PhoneType::Office),
            "studio" => Ok(PhoneType::Studio),
            other => Err(AddressBookError::UnknownPhoneType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub num: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phones: BTreeMap<PhoneType, PhoneNumber>,
}

impl Contact {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phones: BTreeMap::new(),
        }
    }

    pub fn phone(mut self, kind: PhoneType, num: u64) -> Self {
        self.phones.insert(kind, PhoneNumber { num });
        self
    }
}

#[derive(Error, Debug)]
pub enum AddressBookError {
    #[error("Failed to read address book {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse address book {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Unknown phone type: {0}")]
    UnknownPhoneType(String),
}

#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    contacts: Vec<Contact>,
}

impl AddressBook {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    /// Load a JSON array of contacts
    pub fn load(path: &Path) -> Result<Self, AddressBookError> {
        let content = std::fs::read_to_string(path).map_err(|e| AddressBookError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        let contacts: Vec<Contact> =
            serde_json::from_str(&content).map_err(|e| AddressBookError::Parse {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;

        tracing::debug!(path = ?path, contacts = contacts.len(), "Loaded address book");
        Ok(Self { contacts })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn add(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    pub fn find_by_name(&self, name: &str) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| c.name == name).collect()
    }

    pub fn find_by_address(&self, address: &str) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| c.address == address).collect()
    }

    /// Contacts whose `kind` line has number `num`
    pub fn find_by_phone(&self, num: u64, kind: PhoneType) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| c.phones.get(&kind).map(|p| p.num) == Some(num))
            .collect()
    }

    /// Every contact's name, in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.contacts.iter().map(|c| c.name.as_str()).collect()
    }

    /// Every contact's address, in insertion order
    pub fn addresses(&self) -> Vec<&str> {
        self.contacts.iter().map(|c| c.address.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn book() -> AddressBook {
        AddressBook::new(vec![
            Contact::new("Tony", "Malibu")
                .phone(PhoneType::Home, 11122223333)
                .phone(PhoneType::Office, 44455556666),
            Contact::new("Banner", "New York").phone(PhoneType::Home, 77788889999),
            Contact::new("Thor", "Asgard").phone(PhoneType::Studio, 44455556666),
        ])
    }

    #[test]
    fn test_find_by_name_and_address() {
        let book = book();
        assert_eq!(book.find_by_name("Banner")[0].address, "New York");
        assert!(book.find_by_name("Loki").is_empty());
        assert_eq!(book.find_by_address("Asgard")[0].name, "Thor");
    }

    #[test]
    fn test_find_by_phone_respects_type() {
        let book = book();
        let office = book.find_by_phone(44455556666, PhoneType::Office);
        assert_eq!(office.len(), 1);
        assert_eq!(office[0].name, "Tony");

        let studio = book.find_by_phone(44455556666, PhoneType::Studio);
        assert_eq!(studio[0].name, "Thor");

        assert!(book.find_by_phone(44455556666, PhoneType::Home).is_empty());
    }

    #[test]
    fn test_add_and_list() {
        let mut book = book();
        book.add(Contact::new("Natasha", "Moscow"));
        assert_eq!(book.names(), vec!["Tony", "Banner", "Thor", "Natasha"]);
        assert_eq!(book.addresses().last(), Some(&"Moscow"));
    }

    #[test]
    fn test_phone_type_parse() {
        assert_eq!("Office".parse::<PhoneType>().unwrap(), PhoneType::Office);
        assert!(matches!(
            "fax".parse::<PhoneType>(),
            Err(AddressBookError::UnknownPhoneType(_))
        ));
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Tony", "address": "Malibu", "phones": {{"home": {{"num": 11122223333}}}}}}]"#
        )
        .unwrap();

        let book = AddressBook::load(file.path()).unwrap();
        assert_eq!(book.contacts().len(), 1);
        assert_eq!(book.find_by_phone(11122223333, PhoneType::Home).len(), 1);
    }
}
