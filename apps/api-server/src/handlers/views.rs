//! Domain records to wire views. Media identifiers and password hashes stop
//! here.

use staplab_core::domain::{Paragraph, Post, Research, Team, User};
use staplab_shared::dto::{
    ParagraphResponse, PostResponse, ResearchResponse, TeamResponse, UserResponse,
};

fn paragraphs(paragraphs: Vec<Paragraph>) -> Vec<ParagraphResponse> {
    paragraphs
        .into_iter()
        .map(|p| ParagraphResponse {
            content: p.content,
            image: p.image,
            image_caption: p.image_caption,
        })
        .collect()
}

pub fn post(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        url: post.url,
        image: post.image,
        content: post.content,
        authors: post.authors,
        paragraphs: paragraphs(post.paragraphs),
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn research(research: Research) -> ResearchResponse {
    ResearchResponse {
        id: research.id,
        title: research.title,
        url: research.url,
        image: research.image,
        category: research.category,
        content: research.content,
        author: research.author,
        paragraphs: paragraphs(research.paragraphs),
        created_at: research.created_at,
        updated_at: research.updated_at,
    }
}

pub fn team(team: Team) -> TeamResponse {
    TeamResponse {
        id: team.id,
        name: team.name,
        occupation: team.occupation,
        title: team.title,
        image: team.image,
        comment: team.comment,
        affiliation: team.affiliation,
        status: team.status.to_string(),
        twitter: team.twitter,
        facebook: team.facebook,
        linkedin: team.linkedin,
        instagram: team.instagram,
        created_at: team.created_at,
        updated_at: team.updated_at,
    }
}

pub fn user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        fullname: user.fullname,
        email: user.email,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn list<T, V>(items: Vec<T>, view: fn(T) -> V) -> Vec<V> {
    items.into_iter().map(view).collect()
}
