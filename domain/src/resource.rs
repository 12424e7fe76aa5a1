//! Read-only documents published to clients

/// A named document fetched by a fixed URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticResource {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
    pub content: &'static str,
}

pub const SYNTAX_RULES_URI: &str = "arclang://syntax-rules";

/// Mandatory syntax rules clients must follow when writing models.
pub const SYNTAX_RULES: StaticResource = StaticResource {
    uri: SYNTAX_RULES_URI,
    name: "ArcLang Syntax Rules",
    description: "Mandatory syntax rules for generating ArcLang models. AI clients MUST follow these rules.",
    mime_type: "text/markdown",
    content: SYNTAX_RULES_TEXT,
};

/// Every published resource
pub const RESOURCES: &[StaticResource] = &[SYNTAX_RULES];

pub fn find_resource(uri: &str) -> Option<&'static StaticResource> {
    RESOURCES.iter().find(|r| r.uri == uri)
}

const SYNTAX_RULES_TEXT: &str = r#"# ArcLang Syntax Rules - MANDATORY FOR ALL AI CLIENTS

## Model Declaration (REQUIRED FORMAT)
```arc
model ModelName {
    // ModelName must be IDENTIFIER (no quotes, no spaces)
}
```

## Requirements (REQUIRED FORMAT)
```arc
requirements stakeholder {
    req REQ-ID "Title" {
        description: "Text"
        priority: Critical
        safety_level: ASIL_B
    }
}
```

## Architecture (REQUIRED FORMAT)
```arc
architecture logical {
    component ComponentName "Display Name" {
        description: "Text"
        provides interface IName {
            signals: ["Signal: Type"]
        }
    }
    connect ComponentA.IInterface -> ComponentB
}
```

## PROHIBITED SYNTAX
- model "Name with Spaces" { }      -> Use: model ModelName { }
- system "Name" { }                  -> Use: model Name { }
- requirement "REQ-001" { }          -> Use: req REQ-001 "Title" { }
- logical_architecture { }           -> Use: architecture logical { }
- component "Name" { }               -> Use: component Name "Display" { }
- port "name" { }                    -> Use: provides interface IName { }
- function "name" { }                -> Use: description attribute
- Top-level requirements { }         -> Wrap in model { }

## Key Rules
1. Always wrap everything in: model Name { }
2. Use 'architecture logical' not 'logical_architecture'
3. Use 'requirements stakeholder/system/safety' with subtype
4. Use 'req ID "Title"' not 'requirement "ID"'
5. Component names are identifiers, display names are strings
6. Interfaces use 'provides/requires' not 'port'

ALL GENERATED CODE WILL BE VALIDATED. FOLLOW THESE RULES EXACTLY.
"#;
