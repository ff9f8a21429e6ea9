pub mod labyrinth;
