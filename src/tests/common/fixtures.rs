// Resource documents served by the fake API. Hrefs are authority-relative
// so they expand against whichever port the server is bound to.

pub const USER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<user>
  <link rel="self" href="/users/42" />
  <profile>
    <personal>
      <displayname>Jane Doe</displayname>
    </personal>
  </profile>
  <membership>
    <workspaces>
      <workspace title="Workspace One" type="shared">
        <link rel="self" href="/workspaces/1" />
      </workspace>
      <workspace title="Workspace Two" type="private">
        <link rel="self" href="/workspaces/2" />
      </workspace>
    </workspaces>
  </membership>
</user>"#;

pub const WORKSPACE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<workspace title="Workspace One" type="shared">
  <link rel="self" href="/workspaces/1" />
  <link rel="documentLibrary" href="/files/workspaces/1/folders/root" />
  <createdDate>2015-03-02T10:15:00Z</createdDate>
</workspace>"#;

pub const WORKSPACE_TWO: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<workspace title="Workspace Two" type="private">
  <link rel="self" href="/workspaces/2" />
</workspace>"#;

pub const FOLDER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<folder displayName="Document Library">
  <link rel="self" href="/files/folders/10" />
  <actor rel="owner" name="Jane Doe">
    <link rel="self" href="/users/42" />
  </actor>
  <workspace title="Workspace One" type="shared">
    <link rel="self" href="/workspaces/1" />
  </workspace>
  <folders>
    <folder displayName="Reports">
      <link rel="self" href="/files/folders/11" />
    </folder>
    <folder displayName="Minutes">
      <link rel="self" href="/files/folders/12" />
    </folder>
  </folders>
  <documents>
    <document title="Document One" description="The first document">
      <link rel="self" href="/files/documents/100" />
      <link rel="parent-folder" href="/files/folders/10" />
    </document>
  </documents>
</folder>"#;

pub const DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<document title="Document One" description="The first document">
  <link rel="self" href="/files/documents/100" />
  <link rel="parent-folder" href="/files/folders/10" />
  <link rel="content" href="/files/documents/100/content" type="text/plain" />
  <actor rel="owner" name="Jane Doe">
    <link rel="self" href="/users/42" />
  </actor>
  <workspace title="Workspace One" type="shared">
    <link rel="self" href="/workspaces/1" />
  </workspace>
  <createdDate>2015-03-02T10:15:00Z</createdDate>
  <updatedDate>2015-03-04T08:00:00+01:00</updatedDate>
</document>"#;

/// An older copy of DOCUMENT, as embedded before a reload.
pub const STALE_DOCUMENT: &str = r#"<document title="Draft">
  <link rel="self" href="/files/documents/100" />
  <link rel="parent-folder" href="/files/folders/10" />
</document>"#;

pub const DOCUMENT_CONTENT: &str = "hello from document one";

pub fn standard_api() -> super::ApiState {
    super::ApiState::new()
        .document("/entry", USER)
        .document("/users/42", USER)
        .document("/workspaces/1", WORKSPACE)
        .document("/workspaces/2", WORKSPACE_TWO)
        .document("/files/workspaces/1/folders/root", FOLDER)
        .document("/files/folders/10", FOLDER)
        .document("/files/documents/100", DOCUMENT)
        .raw("/files/documents/100/content", "text/plain", DOCUMENT_CONTENT)
}
