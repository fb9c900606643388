#[cfg(test)]
pub mod test {
    /// INI sample covering root items, a key-value section, a flag-only
    /// section, and a mixed-type section.
    pub const SAMPLE_INI: &str = "\
; Sample configuration
path = /usr/local/bin
hosts = alpha.example.com, beta.example.com

[general]
foo = baz
spam = eggs

[list_section]
1.5
2
a,3

[mixed]
boolean = True
list = 1.1,2.2
";

    // -- Structured samples: the same tree in three formats -------------------

    pub const SAMPLE_TOML: &str = r#"
path = "/usr/local/bin"
hosts = ["alpha.example.com", "beta.example.com"]

[section]
attr1 = 1.5
attr2 = 2
foo = 3

[section2]
attr1 = 2.5
attr2 = 4
foo = 5

[section2.inner_section]
two = 2

[section2.inner_section.test_section]
1 = 10
2 = 20
"#;

    pub const SAMPLE_JSON: &str = r#"{
  "path": "/usr/local/bin",
  "hosts": ["alpha.example.com", "beta.example.com"],
  "section": { "attr1": 1.5, "attr2": 2, "foo": 3 },
  "section2": {
    "attr1": 2.5,
    "attr2": 4,
    "foo": 5,
    "inner_section": {
      "two": 2,
      "test_section": { "1": 10, "2": 20 }
    }
  }
}"#;

    #[cfg(feature = "yaml")]
    pub const SAMPLE_YAML: &str = "\
path: /usr/local/bin
hosts:
  - alpha.example.com
  - beta.example.com
section:
  attr1: 1.5
  attr2: 2
  foo: 3
section2:
  attr1: 2.5
  attr2: 4
  foo: 5
  inner_section:
    two: 2
    test_section:
      1: 10
      2: 20
";

    #[test]
    fn samples_are_well_formed() {
        assert!(SAMPLE_TOML.parse::<toml::Table>().is_ok());
        assert!(serde_json::from_str::<serde_json::Value>(SAMPLE_JSON).is_ok());
    }
}
