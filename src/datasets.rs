use crate::{HttpClient, Result, Table};
use serde::Serialize;
use std::fmt;

/// Mushroom Observer homepage, which also serves the data exports
pub const MO_HOMEPAGE: &str = "https://mushroomobserver.org";

/// The tab-separated exports published by Mushroom Observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Names,
    Observations,
    Images,
    ImageObservations,
    NameDescriptions,
    Locations,
}

impl Dataset {
    /// Every published export
    pub const ALL: [Self; 6] = [
        Self::Names,
        Self::Observations,
        Self::Images,
        Self::ImageObservations,
        Self::NameDescriptions,
        Self::Locations,
    ];

    /// Export file name under the homepage
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Names => "names.csv",
            Self::Observations => "observations.csv",
            Self::Images => "images.csv",
            Self::ImageObservations => "images_observations.csv",
            Self::NameDescriptions => "name_descriptions.csv",
            Self::Locations => "locations.csv",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Client for downloading and parsing the data exports
#[derive(Clone)]
pub struct DatasetClient {
    http: HttpClient,
}

impl DatasetClient {
    /// Create a client pointing at the Mushroom Observer homepage
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(MO_HOMEPAGE)
    }

    /// Create a client pointing at a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(base_url),
        }
    }

    /// Download one export and parse it into a [`Table`]
    pub async fn load(&self, dataset: Dataset) -> Result<Table> {
        let text = self.http.get_text(dataset.file_name()).await?;

        // The name descriptions export embeds literal "\n" escapes and
        // stray carriage returns inside free-text cells; strip both before
        // parsing so they cannot break the line structure.
        let text = if dataset == Dataset::NameDescriptions {
            text.replace("\\n", "").replace('\r', "")
        } else {
            text
        };

        Table::parse(&text)
    }

    pub async fn load_names(&self) -> Result<Table> {
        self.load(Dataset::Names).await
    }

    pub async fn load_observations(&self) -> Result<Table> {
        self.load(Dataset::Observations).await
    }

    pub async fn load_images(&self) -> Result<Table> {
        self.load(Dataset::Images).await
    }

    pub async fn load_image_observations(&self) -> Result<Table> {
        self.load(Dataset::ImageObservations).await
    }

    pub async fn load_name_descriptions(&self) -> Result<Table> {
        self.load(Dataset::NameDescriptions).await
    }

    pub async fn load_locations(&self) -> Result<Table> {
        self.load(Dataset::Locations).await
    }
}

impl Default for DatasetClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn every_dataset_has_a_distinct_file_name() {
        let mut names: Vec<_> = Dataset::ALL.iter().map(|d| d.file_name()).collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), Dataset::ALL.len());
    }

    #[tokio::test]
    async fn load_parses_an_export() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/names.csv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("id\ttext_name\n1\tAgaricus campestris\n"),
            )
            .mount(&server)
            .await;

        let client = DatasetClient::with_base_url(server.uri());
        let table = client.load_names().await.unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.row(0).unwrap().get("text_name"),
            Some("Agaricus campestris")
        );
    }

    #[tokio::test]
    async fn name_descriptions_strips_embedded_escapes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/name_descriptions.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "id\tgen_desc\n1\tCap convex.\\nGills free.\r\n",
            ))
            .mount(&server)
            .await;

        let client = DatasetClient::with_base_url(server.uri());
        let table = client.load_name_descriptions().await.unwrap();

        assert_eq!(
            table.row(0).unwrap().get("gen_desc"),
            Some("Cap convex.Gills free.")
        );
    }
}
