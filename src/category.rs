use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The three demographic axes the classifier reports on.
#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Race,
    Age,
    Sex,
}

impl Category {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Race => "race",
            Self::Age => "age",
            Self::Sex => "sex",
        }
    }

    /// Alternate payload key. Only `sex` has one (`gender`).
    pub fn alias(&self) -> &'static str {
        match self {
            Self::Sex => "gender",
            other => other.key(),
        }
    }

    pub fn panel_label(&self) -> &'static str {
        match self {
            Self::Race => "RACE",
            Self::Age => "AGE",
            Self::Sex => "SEX",
        }
    }

    pub fn all() -> impl Iterator<Item = Category> {
        Category::iter()
    }
}

/// One value per category, indexable by [`Category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerCategory<T> {
    pub race: T,
    pub age: T,
    pub sex: T,
}

impl<T> PerCategory<T> {
    pub fn new(race: T, age: T, sex: T) -> Self {
        Self { race, age, sex }
    }

    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            race: f(Category::Race),
            age: f(Category::Age),
            sex: f(Category::Sex),
        }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Race => &self.race,
            Category::Age => &self.age,
            Category::Sex => &self.sex,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Race => &mut self.race,
            Category::Age => &mut self.age,
            Category::Sex => &mut self.sex,
        }
    }

    pub fn set(&mut self, category: Category, value: T) {
        *self.get_mut(category) = value;
    }
}

impl<T> std::ops::Index<Category> for PerCategory<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        self.get(category)
    }
}

impl<T> std::ops::IndexMut<Category> for PerCategory<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        self.get_mut(category)
    }
}
