mod collection_view;

pub use collection_view::CollectionView;
