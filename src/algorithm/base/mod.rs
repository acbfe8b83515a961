pub mod city;
pub mod power;
