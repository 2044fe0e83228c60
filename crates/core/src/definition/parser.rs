//! Definition document parsing.

use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::metrics::DEFINITIONS_PARSED;

use super::selector::{normalize_selector, parse_filters, Selector};
use super::types::{
    default_method, Capabilities, Captcha, CategoryMapping, Definition, DownloadBefore,
    DownloadConfig, IndexerType, LoginConfig, LoginTest, SearchConfig, SearchPath, Setting,
};
use super::yaml::{
    get, get_bool, get_f64, get_list_map, get_string, get_string_list, get_string_map,
    scalar_string, string_list,
};
use super::DefinitionError;

/// Parse a YAML definition document into a [`Definition`].
///
/// Sections are built in a fixed order (search, login, caps, download,
/// settings, top-level scalars) and the first failure is returned.
/// Structural parsing does not check field contents; use
/// [`validate_definition`](super::validate_definition) for that.
pub fn parse_definition(text: &str) -> Result<Definition, DefinitionError> {
    let result = parse_document(text);

    match &result {
        Ok(definition) => {
            DEFINITIONS_PARSED.with_label_values(&["ok"]).inc();
            debug!(
                id = %definition.id,
                paths = definition.search.paths.len(),
                fields = definition.search.fields.len(),
                "Parsed indexer definition"
            );
        }
        Err(e) => {
            DEFINITIONS_PARSED.with_label_values(&[e.code()]).inc();
            debug!(error = %e, "Failed to parse indexer definition");
        }
    }

    result
}

fn parse_document(text: &str) -> Result<Definition, DefinitionError> {
    let document: Value =
        serde_yaml::from_str(text).map_err(|e| DefinitionError::ParseError(e.to_string()))?;
    let root = document.as_mapping().ok_or_else(|| {
        DefinitionError::ParseError("definition root must be a mapping".to_string())
    })?;

    let search = build_search(get(root, "search"))?;
    let login = match get(root, "login") {
        Some(value) => Some(build_login(value)?),
        None => None,
    };
    let capabilities = build_capabilities(get(root, "caps"))?;
    let download = get(root, "download").map(build_download).transpose()?;
    let settings = build_settings(get(root, "settings"))?;

    Ok(Definition {
        id: required_string(root, "id")?,
        name: required_string(root, "name")?,
        description: required_string(root, "description")?,
        language: required_string(root, "language")?,
        indexer_type: indexer_type(root)?,
        encoding: required_string(root, "encoding")?,
        links: get(root, "links")
            .map(string_list)
            .ok_or_else(|| DefinitionError::MissingRequiredField("links".to_string()))?,
        legacy_links: get_string_list(root, "legacylinks"),
        capabilities,
        search,
        login,
        download,
        settings,
        request_delay: get_f64(root, "requestdelay").or_else(|| get_f64(root, "requestDelay")),
        follow_redirect: get_bool(root, "followredirect").unwrap_or(false),
        test_link_torrent: get_bool(root, "testlinktorrent").unwrap_or(true),
        certificates: get_string_list(root, "certificates"),
        replaces: get_string_list(root, "replaces"),
    })
}

fn required_string(map: &Mapping, key: &str) -> Result<String, DefinitionError> {
    get_string(map, key).ok_or_else(|| DefinitionError::MissingRequiredField(key.to_string()))
}

fn indexer_type(map: &Mapping) -> Result<IndexerType, DefinitionError> {
    let label = required_string(map, "type")?;
    IndexerType::from_label(&label).ok_or(DefinitionError::InvalidType(label))
}

fn build_search(value: Option<&Value>) -> Result<SearchConfig, DefinitionError> {
    let search = match value {
        None => return Err(DefinitionError::MissingSearchPath),
        Some(Value::Mapping(map)) => map,
        Some(_) => {
            return Err(DefinitionError::ParseError(
                "search must be a mapping".to_string(),
            ))
        }
    };

    // A single `path` wins over a `paths` list.
    let paths = if let Some(path) = get_string(search, "path") {
        vec![SearchPath {
            path,
            categories: Vec::new(),
            method: default_method(),
        }]
    } else {
        match get(search, "paths") {
            Some(Value::Sequence(entries)) => entries
                .iter()
                .map(build_search_path)
                .collect::<Result<Vec<_>, _>>()?,
            _ => Vec::new(),
        }
    };
    if paths.is_empty() {
        return Err(DefinitionError::MissingSearchPath);
    }

    let rows = match get(search, "rows") {
        None => return Err(DefinitionError::MissingRowsSelector),
        Some(value) => normalize_selector(value)
            .ok_or_else(|| DefinitionError::InvalidSelector("rows".to_string()))?,
    };

    let fields = match get(search, "fields") {
        None => return Err(DefinitionError::MissingFields),
        Some(Value::Mapping(entries)) => build_fields(entries)?,
        Some(_) => return Err(DefinitionError::InvalidFieldsFormat),
    };

    Ok(SearchConfig {
        paths,
        inputs: get_string_map(search, "inputs"),
        headers: get_list_map(search, "headers"),
        keywords_filters: get(search, "keywordsfilters")
            .map(parse_filters)
            .unwrap_or_default(),
        rows,
        fields,
    })
}

fn build_search_path(entry: &Value) -> Result<SearchPath, DefinitionError> {
    match entry {
        Value::Mapping(map) => Ok(SearchPath {
            path: get_string(map, "path").ok_or(DefinitionError::MissingSearchPath)?,
            categories: get_string_list(map, "categories"),
            method: get_string(map, "method")
                .map(|m| m.to_ascii_lowercase())
                .unwrap_or_else(default_method),
        }),
        other => scalar_string(other)
            .map(|path| SearchPath {
                path,
                categories: Vec::new(),
                method: default_method(),
            })
            .ok_or(DefinitionError::MissingSearchPath),
    }
}

fn build_fields(entries: &Mapping) -> Result<BTreeMap<String, Selector>, DefinitionError> {
    entries
        .iter()
        .map(|(key, value)| {
            let name = scalar_string(key).ok_or(DefinitionError::InvalidFieldsFormat)?;
            let selector = normalize_selector(value)
                .ok_or_else(|| DefinitionError::InvalidSelector(name.clone()))?;
            Ok((name, selector))
        })
        .collect()
}

fn build_login(value: &Value) -> Result<LoginConfig, DefinitionError> {
    let Value::Mapping(login) = value else {
        return Err(DefinitionError::InvalidLoginConfig);
    };

    let method = get_string(login, "method").ok_or(DefinitionError::MissingLoginMethod)?;

    let error = match get(login, "error") {
        Some(Value::Sequence(entries)) => {
            entries.iter().filter_map(normalize_selector).collect()
        }
        Some(other) => normalize_selector(other).into_iter().collect(),
        None => Vec::new(),
    };

    let test = match get(login, "test") {
        Some(Value::Mapping(test)) => Some(LoginTest {
            path: get_string(test, "path"),
            selector: get_string(test, "selector"),
        }),
        _ => None,
    };

    let captcha = match get(login, "captcha") {
        Some(Value::Mapping(captcha)) => get_string(captcha, "type").map(|kind| Captcha {
            kind,
            selector: get_string(captcha, "selector"),
            input: get_string(captcha, "input"),
        }),
        _ => None,
    };

    Ok(LoginConfig {
        method: method.to_ascii_lowercase(),
        path: get_string(login, "path").unwrap_or_default(),
        submit_path: get_string(login, "submitpath"),
        form: get_string(login, "form"),
        inputs: get_string_map(login, "inputs"),
        error,
        test,
        cookies: get_string_list(login, "cookies"),
        captcha,
    })
}

fn build_capabilities(value: Option<&Value>) -> Result<Capabilities, DefinitionError> {
    let Some(Value::Mapping(caps)) = value else {
        return Err(DefinitionError::MissingCapabilities);
    };

    let modes = match get(caps, "modes") {
        Some(Value::Mapping(_)) => Some(get_list_map(caps, "modes")),
        _ => None,
    };

    let category_mappings = match get(caps, "categorymappings") {
        Some(Value::Sequence(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let map = entry.as_mapping()?;
                Some(CategoryMapping {
                    id: get_string(map, "id")?,
                    cat: get_string(map, "cat")?,
                    desc: get_string(map, "desc"),
                    default: get_bool(map, "default").unwrap_or(false),
                })
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(Capabilities {
        modes,
        categories: get_string_map(caps, "categories"),
        category_mappings,
    })
}

fn build_download(value: &Value) -> Result<DownloadConfig, DefinitionError> {
    let Value::Mapping(download) = value else {
        return Err(DefinitionError::ParseError(
            "download must be a mapping".to_string(),
        ));
    };

    let selectors = match get(download, "selectors") {
        Some(Value::Sequence(entries)) => entries
            .iter()
            .map(|entry| {
                normalize_selector(entry)
                    .ok_or_else(|| DefinitionError::InvalidSelector("download.selectors".into()))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(DefinitionError::InvalidSelector(
                "download.selectors".to_string(),
            ))
        }
        // Older definitions use a single `selector` key.
        None => get(download, "selector")
            .and_then(normalize_selector)
            .into_iter()
            .collect(),
    };

    // The DSL spells infohash as `{hash: <selector>, title: <selector>}`.
    let infohash = match get(download, "infohash") {
        Some(Value::Mapping(map)) if map.contains_key("hash") => {
            get(map, "hash").and_then(normalize_selector)
        }
        Some(other) => normalize_selector(other),
        None => None,
    };

    let before = match get(download, "before") {
        Some(Value::Mapping(before)) => Some(DownloadBefore {
            path: get_string(before, "path"),
            method: get_string(before, "method"),
            inputs: get_string_map(before, "inputs"),
        }),
        _ => None,
    };

    Ok(DownloadConfig {
        selectors,
        before,
        method: get_string(download, "method"),
        infohash,
    })
}

fn build_settings(value: Option<&Value>) -> Result<Vec<Setting>, DefinitionError> {
    let entries = match value {
        None => return Ok(Vec::new()),
        Some(Value::Sequence(entries)) => entries,
        Some(_) => {
            return Err(DefinitionError::InvalidSetting(
                "settings must be a list".to_string(),
            ))
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let map = entry
                .as_mapping()
                .ok_or_else(|| DefinitionError::InvalidSetting(format!("#{}", index)))?;
            let name = get_string(map, "name")
                .ok_or_else(|| DefinitionError::InvalidSetting(format!("#{} has no name", index)))?;
            let kind = get_string(map, "type")
                .ok_or_else(|| DefinitionError::InvalidSetting(format!("{} has no type", name)))?;

            Ok(Setting {
                name,
                kind,
                label: get_string(map, "label"),
                default: get_string(map, "default"),
                options: get_string_map(map, "options"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::MINIMAL_DEFINITION;

    fn without_key(yaml: &str, key: &str) -> String {
        let mut doc: Mapping = serde_yaml::from_str(yaml).unwrap();
        doc.remove(key);
        serde_yaml::to_string(&doc).unwrap()
    }

    #[test]
    fn test_parse_minimal_definition() {
        let def = parse_definition(MINIMAL_DEFINITION).unwrap();
        assert_eq!(def.id, "examplepublic");
        assert_eq!(def.name, "Example Public");
        assert_eq!(def.indexer_type, IndexerType::Public);
        assert_eq!(def.encoding, "UTF-8");
        assert_eq!(def.links, vec!["https://example.org/"]);
        assert_eq!(def.search.paths.len(), 1);
        assert_eq!(def.search.paths[0].path, "search/{{ .Keywords }}/1/");
        assert_eq!(def.search.paths[0].method, "get");
        assert!(def.search.paths[0].categories.is_empty());
        assert_eq!(def.search.rows, Selector::new("table.results > tbody > tr"));
        assert!(def.search.fields.contains_key("title"));
        assert!(def.login.is_none());
        assert!(def.download.is_none());
        assert!(def.test_link_torrent);
        assert!(!def.follow_redirect);
        assert!(def.supports_mode("search"));
    }

    #[test]
    fn test_parse_full_definition() {
        let yaml = r#"
id: fulltracker
name: Full Tracker
description: A private tracker
language: en-US
type: private
encoding: UTF-8
requestDelay: 2.5
followredirect: true
testlinktorrent: false
links:
  - https://full.example/
legacylinks:
  - https://old.full.example/
certificates: [abc123]
replaces: [oldtracker]
caps:
  categorymappings:
    - {id: 1, cat: Movies, desc: "Movies"}
    - {id: 2, cat: TV, desc: "TV", default: true}
  modes:
    search: [q]
    tv-search: [q, season, ep]
settings:
  - name: username
    type: text
    label: Username
  - name: sort
    type: select
    default: added
    options:
      added: created
      seeders: seeders
login:
  method: post
  path: login.php
  submitpath: takelogin.php
  inputs:
    username: "{{ .Config.username }}"
  error:
    - selector: div.error
  test:
    path: index.php
    selector: a[href="logout.php"]
search:
  paths:
    - path: browse.php
      categories: [1, 2]
    - path: api/search
      method: POST
  headers:
    User-Agent: mydia
  inputs:
    search: "{{ .Keywords }}"
  keywordsfilters:
    - name: re_replace
      args: ["\\s+", "+"]
  rows:
    selector: tr.torrent
    remove: script
  fields:
    title: a.name
    size:
      selector: td.size
    seeders:
      selector: td.seeders
      filters:
        - name: replace
          args: [",", ""]
download:
  selectors:
    - selector: a.download
      attribute: href
  infohash:
    hash:
      selector: td.hash
    title:
      selector: a.name
"#;
        let def = parse_definition(yaml).unwrap();
        assert_eq!(def.indexer_type, IndexerType::Private);
        assert_eq!(def.request_delay, Some(2.5));
        assert!(def.follow_redirect);
        assert!(!def.test_link_torrent);
        assert_eq!(def.legacy_links, vec!["https://old.full.example/"]);
        assert_eq!(def.certificates, vec!["abc123"]);
        assert_eq!(def.replaces, vec!["oldtracker"]);

        assert_eq!(def.capabilities.category_mappings.len(), 2);
        assert_eq!(def.capabilities.category_mappings[0].id, "1");
        assert!(def.capabilities.category_mappings[1].default);
        assert_eq!(
            def.capabilities.modes.as_ref().unwrap()["tv-search"],
            vec!["q", "season", "ep"]
        );

        assert_eq!(def.settings.len(), 2);
        assert_eq!(def.settings[1].default.as_deref(), Some("added"));
        assert_eq!(def.settings[1].options["seeders"], "seeders");

        let login = def.login.as_ref().unwrap();
        assert_eq!(login.method, "post");
        assert_eq!(login.submit_path.as_deref(), Some("takelogin.php"));
        assert_eq!(login.error, vec![Selector::new("div.error")]);
        assert_eq!(login.test.as_ref().unwrap().path.as_deref(), Some("index.php"));

        assert_eq!(def.search.paths.len(), 2);
        assert_eq!(def.search.paths[0].categories, vec!["1", "2"]);
        assert_eq!(def.search.paths[1].method, "post");
        assert_eq!(def.search.headers["User-Agent"], vec!["mydia"]);
        assert_eq!(def.search.keywords_filters[0].name, "re_replace");
        assert_eq!(def.search.rows.remove.as_deref(), Some("script"));
        assert_eq!(def.search.fields["title"], Selector::new("a.name"));
        assert_eq!(def.search.fields["seeders"].filters[0].args, vec![",", ""]);

        let download = def.download.as_ref().unwrap();
        assert_eq!(download.selectors[0].attribute.as_deref(), Some("href"));
        assert_eq!(download.infohash, Some(Selector::new("td.hash")));
    }

    #[test]
    fn test_single_path_preferred_over_paths() {
        let yaml = MINIMAL_DEFINITION.replace(
            "  path: search/{{ .Keywords }}/1/",
            "  path: single.php\n  paths:\n    - path: list.php",
        );
        let def = parse_definition(&yaml).unwrap();
        assert_eq!(def.search.paths.len(), 1);
        assert_eq!(def.search.paths[0].path, "single.php");
    }

    #[test]
    fn test_missing_search_path() {
        let yaml = MINIMAL_DEFINITION.replace("  path: search/{{ .Keywords }}/1/\n", "");
        assert_eq!(
            parse_definition(&yaml).unwrap_err(),
            DefinitionError::MissingSearchPath
        );
    }

    #[test]
    fn test_missing_rows_selector() {
        let yaml = MINIMAL_DEFINITION.replace("  rows:\n    selector: table.results > tbody > tr\n", "");
        assert_eq!(
            parse_definition(&yaml).unwrap_err(),
            DefinitionError::MissingRowsSelector
        );
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        let mut doc: Mapping = serde_yaml::from_str(MINIMAL_DEFINITION).unwrap();
        let search = doc.get_mut("search").unwrap().as_mapping_mut().unwrap();
        search.remove("fields");
        let yaml = serde_yaml::to_string(&doc).unwrap();
        assert_eq!(
            parse_definition(&yaml).unwrap_err(),
            DefinitionError::MissingFields
        );

        let search = doc.get_mut("search").unwrap().as_mapping_mut().unwrap();
        search.insert(
            Value::String("fields".into()),
            Value::Sequence(vec![Value::String("title".into())]),
        );
        let yaml = serde_yaml::to_string(&doc).unwrap();
        assert_eq!(
            parse_definition(&yaml).unwrap_err(),
            DefinitionError::InvalidFieldsFormat
        );
    }

    #[test]
    fn test_missing_capabilities() {
        let yaml = without_key(MINIMAL_DEFINITION, "caps");
        let err = parse_definition(&yaml).unwrap_err();
        assert_eq!(err, DefinitionError::MissingCapabilities);
        assert_eq!(err.code(), "missing_capabilities");
    }

    #[test]
    fn test_login_requires_method() {
        let yaml = format!("{}login:\n  path: login.php\n", MINIMAL_DEFINITION);
        assert_eq!(
            parse_definition(&yaml).unwrap_err(),
            DefinitionError::MissingLoginMethod
        );
    }

    #[test]
    fn test_null_sections_are_absent() {
        let yaml = format!("{}login: ~\ndownload:\n", MINIMAL_DEFINITION);
        let def = parse_definition(&yaml).unwrap();
        assert!(def.login.is_none());
        assert!(def.download.is_none());
        assert!(!def.requires_login());
    }

    #[test]
    fn test_login_must_be_mapping() {
        let yaml = format!("{}login: cookie\n", MINIMAL_DEFINITION);
        assert_eq!(
            parse_definition(&yaml).unwrap_err(),
            DefinitionError::InvalidLoginConfig
        );
    }

    #[test]
    fn test_setting_requires_name_and_type() {
        let yaml = format!("{}settings:\n  - name: apikey\n", MINIMAL_DEFINITION);
        let err = parse_definition(&yaml).unwrap_err();
        assert_eq!(err.code(), "invalid_setting");
    }

    #[test]
    fn test_missing_required_scalar() {
        let yaml = without_key(MINIMAL_DEFINITION, "id");
        assert_eq!(
            parse_definition(&yaml).unwrap_err(),
            DefinitionError::MissingRequiredField("id".to_string())
        );

        let yaml = without_key(MINIMAL_DEFINITION, "links");
        assert_eq!(
            parse_definition(&yaml).unwrap_err().tag(),
            "missing_required_field:links"
        );
    }

    #[test]
    fn test_unknown_type() {
        let yaml = MINIMAL_DEFINITION.replace("type: public", "type: secret");
        assert_eq!(
            parse_definition(&yaml).unwrap_err(),
            DefinitionError::InvalidType("secret".to_string())
        );
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = parse_definition("id: [unclosed").unwrap_err();
        assert_eq!(err.code(), "parse_error");

        let err = parse_definition("- just\n- a list\n").unwrap_err();
        assert_eq!(err.code(), "parse_error");
    }

    #[test]
    fn test_invalid_field_selector() {
        let yaml = MINIMAL_DEFINITION.replace("    title: a.title", "    title: [a, b]");
        assert_eq!(
            parse_definition(&yaml).unwrap_err(),
            DefinitionError::InvalidSelector("title".to_string())
        );
    }
}
