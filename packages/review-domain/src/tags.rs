use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationTag {
	#[serde(rename = "type")]
	pub tag_type: String,
	pub keyword: String,
}

/// Displayable tags of one type, in the order they were first seen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
	#[serde(rename = "type")]
	pub tag_type: String,
	pub keywords: Vec<String>,
}

pub fn is_displayable<S>(tag_type: &str, hidden: &[S]) -> bool
where
	S: AsRef<str>,
{
	!hidden.iter().any(|hidden_type| hidden_type.as_ref() == tag_type)
}

pub fn retain_displayable<S>(tags: Vec<AnnotationTag>, hidden: &[S]) -> Vec<AnnotationTag>
where
	S: AsRef<str>,
{
	tags.into_iter().filter(|tag| is_displayable(&tag.tag_type, hidden)).collect()
}

pub fn group_by_type<S>(tags: &[AnnotationTag], hidden: &[S]) -> Vec<TagGroup>
where
	S: AsRef<str>,
{
	let mut groups: Vec<TagGroup> = Vec::new();

	for tag in tags.iter().filter(|tag| is_displayable(&tag.tag_type, hidden)) {
		match groups.iter_mut().find(|group| group.tag_type == tag.tag_type) {
			Some(group) => group.keywords.push(tag.keyword.clone()),
			None => groups.push(TagGroup {
				tag_type: tag.tag_type.clone(),
				keywords: vec![tag.keyword.clone()],
			}),
		}
	}

	groups
}
