//! 名刺ストア
//!
//! 撮影順に並んだ名刺の一覧を保持する。位置（index）は変更のたびに
//! ずれるので、長く持ち回る参照には `CardId` を使うこと。

use crate::error::{Error, Result};
use crate::types::{CardId, CardImage, CardSide};

/// 名刺1枚（画像 + 注釈）
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub image: CardImage,
    /// 注釈（未入力は空文字）
    pub annotation: String,
    pub side: CardSide,
}

/// 名刺一覧
#[derive(Debug, Default, Clone)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 末尾に追加して位置を返す（注釈は空）
    pub fn append(&mut self, image: CardImage) -> usize {
        self.append_with_annotation(image, CardSide::Front, String::new())
    }

    pub fn append_with_annotation(
        &mut self,
        image: CardImage,
        side: CardSide,
        annotation: impl Into<String>,
    ) -> usize {
        self.cards.push(Card {
            id: CardId::new(),
            image,
            annotation: annotation.into(),
            side,
        });
        self.cards.len() - 1
    }

    /// 注釈を上書き
    pub fn update_annotation(&mut self, position: usize, text: impl Into<String>) -> Result<()> {
        let len = self.cards.len();
        let card = self
            .cards
            .get_mut(position)
            .ok_or(Error::PositionNotFound { position, len })?;
        card.annotation = text.into();
        Ok(())
    }

    /// 削除（後続の位置は1つ前へずれる）
    pub fn remove(&mut self, position: usize) -> Result<Card> {
        if position >= self.cards.len() {
            return Err(Error::PositionNotFound {
                position,
                len: self.cards.len(),
            });
        }
        Ok(self.cards.remove(position))
    }

    /// 表示用のスナップショット
    pub fn list(&self) -> Vec<Card> {
        self.cards.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn get_at(&self, position: usize) -> Result<&Card> {
        self.cards.get(position).ok_or(Error::PositionNotFound {
            position,
            len: self.cards.len(),
        })
    }

    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    pub fn update_annotation_by_id(&mut self, id: CardId, text: impl Into<String>) -> Result<usize> {
        let position = self.position_of(id).ok_or(Error::CardNotFound(id))?;
        self.update_annotation(position, text)?;
        Ok(position)
    }

    pub fn remove_by_id(&mut self, id: CardId) -> Result<Card> {
        let position = self.position_of(id).ok_or(Error::CardNotFound(id))?;
        self.remove(position)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
