use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Anything that can be offered as an entry of a selection list.
pub trait Named {
    fn id(&self) -> u64;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

impl Named for Genre {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A genre attached to a movie. The backend nests it under `genre`, older
/// payloads send the flat record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GenreRef {
    Nested { genre: Genre },
    Flat(Genre),
}

impl GenreRef {
    pub fn genre(&self) -> &Genre {
        match self {
            GenreRef::Nested { genre } => genre,
            GenreRef::Flat(genre) => genre,
        }
    }
}

/// An actor or a director.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub movies_count: Option<u32>,
}

impl Named for Person {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Person {
    /// True when the backend reports more movies than it embedded.
    pub fn has_more_movies(&self) -> bool {
        self.movies_count
            .is_some_and(|count| count as usize > self.movies.len())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CastMember {
    pub person: Person,
    #[serde(default)]
    pub character_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_year: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub genres_info: Vec<GenreRef>,
    #[serde(default)]
    pub actors_info: Vec<CastMember>,
    #[serde(default)]
    pub director_info: Option<Person>,
}

impl Movie {
    pub fn genre_names(&self) -> Vec<&str> {
        self.genres_info
            .iter()
            .map(|g| g.genre().name.as_str())
            .collect()
    }

    pub fn year_label(&self) -> String {
        self.release_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| "----".to_string())
    }

    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(rating) => format!("{:.1}", rating),
            None => "N/A".to_string(),
        }
    }
}

// DRF serializes decimals as strings ("8.50"), hand-written fixtures use numbers.
fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(value)) => Some(value),
        Some(Raw::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

/// Pagination block of the list envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationMeta {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One page of a list endpoint. Accepts both the paginated envelope and a
/// bare JSON array.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub pagination: Option<PaginationMeta>,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, pagination: Option<PaginationMeta>) -> Self {
        Self {
            results,
            pagination,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Envelope {
        results: Vec<T>,
        #[serde(default)]
        pagination: Option<PaginationMeta>,
    },
    Bare(Vec<T>),
}

impl<'de, T> Deserialize<'de> for Page<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match ListBody::deserialize(deserializer)? {
            ListBody::Envelope {
                results,
                pagination,
            } => Page::new(results, pagination),
            ListBody::Bare(results) => Page::new(results, None),
        })
    }
}
